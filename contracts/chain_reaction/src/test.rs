extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, String, TryIntoVal,
};
use vibecaster_badges::{VibeCasterBadges, VibeCasterBadgesClient};
use vibecaster_points::{VibeCasterPoints, VibeCasterPointsClient};

use crate::{ChainReactionContract, ChainReactionContractClient, ChallengeJoined, Error, MAX_PAGE_SIZE};

struct Fixture {
    env: Env,
    owner: Address,
    chain: ChainReactionContractClient<'static>,
    points: VibeCasterPointsClient<'static>,
    badges: VibeCasterBadgesClient<'static>,
}

fn setup() -> Fixture {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);

    let points_id = env.register(VibeCasterPoints, (owner.clone(),));
    let badges_id = env.register(
        VibeCasterBadges,
        (
            owner.clone(),
            String::from_str(&env, "VibeCaster Badges"),
            String::from_str(&env, "VCB"),
            String::from_str(&env, "https://ipfs.io/ipfs/"),
        ),
    );
    let chain_id = env.register(
        ChainReactionContract,
        (owner.clone(), points_id.clone(), badges_id.clone()),
    );

    let f = Fixture {
        chain: ChainReactionContractClient::new(&env, &chain_id),
        points: VibeCasterPointsClient::new(&env, &points_id),
        badges: VibeCasterBadgesClient::new(&env, &badges_id),
        owner,
        env,
    };
    f.points.authorize_contract(&f.owner, &f.chain.address);
    f.badges.authorize_minter(&f.owner, &f.chain.address);
    f
}

fn s(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

fn start(f: &Fixture, user: &Address) -> u64 {
    f.chain
        .start_challenge(user, &s(&f.env, "Show your desk setup"), &s(&f.env, "QmDesk"))
}

fn join(f: &Fixture, user: &Address, challenge: u64, parent: u64) -> u64 {
    f.chain
        .join_challenge(user, &challenge, &parent, &s(&f.env, "Here's mine"), &s(&f.env, ""))
}

#[test]
fn test_start_challenge_rewards_and_badge() {
    let f = setup();
    let user1 = Address::generate(&f.env);

    let id = start(&f, &user1);

    assert_eq!(id, 1);
    let challenge = f.chain.get_challenge(&id);
    assert_eq!(challenge.initiator, user1);
    assert_eq!(challenge.prompt_image_ipfs_hash, s(&f.env, "QmDesk"));
    assert_eq!(f.chain.challenge_response_count(&id), 0);
    assert_eq!(f.points.get_points(&user1), 15);
    assert!(f.badges.has_badge(&user1, &s(&f.env, "Chain Starter")));

    start(&f, &user1);
    assert_eq!(f.badges.balance_of(&user1), 1);
    assert_eq!(f.chain.get_user_challenges(&user1, &0, &10), vec![&f.env, 1u64, 2u64]);
    assert_eq!(f.chain.get_user_challenges(&user1, &1, &10), vec![&f.env, 2u64]);
    assert_eq!(f.chain.user_challenge_count(&user1), 2);
}

#[test]
fn test_join_builds_reply_tree() {
    let f = setup();
    let user1 = Address::generate(&f.env);
    let user2 = Address::generate(&f.env);
    let user3 = Address::generate(&f.env);

    let challenge = start(&f, &user1);
    let first = join(&f, &user2, challenge, 0);
    let second = join(&f, &user3, challenge, first);

    assert_eq!(
        f.chain.get_challenge_responses(&challenge, &0, &10),
        vec![&f.env, first, second]
    );
    let parent = f.chain.get_response(&first);
    assert_eq!(parent.parent_response_id, 0);
    assert_eq!(f.chain.get_child_responses(&first, &0, &10), vec![&f.env, second]);
    assert_eq!(f.chain.child_response_count(&second), 0);
    let child = f.chain.get_response(&second);
    assert_eq!(child.parent_response_id, first);
    assert_eq!(child.parent_challenge_id, challenge);

    assert_eq!(f.points.get_points(&user2), 10);
    assert_eq!(f.points.get_points(&user3), 10);
    assert_eq!(f.chain.total_responses(), 2);
}

#[test]
fn test_joined_event() {
    let f = setup();
    let user1 = Address::generate(&f.env);
    let user2 = Address::generate(&f.env);
    let challenge = start(&f, &user1);

    let response = join(&f, &user2, challenge, 0);

    let last_event = f.env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, f.chain.address);
    assert_eq!(
        last_event.1,
        vec![&f.env, symbol_short!("joined").into_val(&f.env), challenge.into_val(&f.env)]
    );
    let data: ChallengeJoined = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(data.response_id, response);
    assert_eq!(data.responder, user2);
}

#[test]
fn test_join_missing_challenge_or_parent() {
    let f = setup();
    let user = Address::generate(&f.env);

    assert_eq!(
        f.chain
            .try_join_challenge(&user, &4, &0, &s(&f.env, "hi"), &s(&f.env, "")),
        Err(Ok(Error::ChallengeNotFound))
    );

    let challenge = start(&f, &user);
    assert_eq!(
        f.chain
            .try_join_challenge(&user, &challenge, &9, &s(&f.env, "hi"), &s(&f.env, "")),
        Err(Ok(Error::ResponseNotFound))
    );
}

#[test]
fn test_parent_from_other_challenge_rejected() {
    let f = setup();
    let user = Address::generate(&f.env);
    let first = start(&f, &user);
    let second = start(&f, &user);
    let reply = join(&f, &user, first, 0);

    let result = f
        .chain
        .try_join_challenge(&user, &second, &reply, &s(&f.env, "hi"), &s(&f.env, ""));

    assert_eq!(result, Err(Ok(Error::ParentMismatch)));
    assert_eq!(f.chain.challenge_response_count(&second), 0);
    assert_eq!(f.chain.child_response_count(&reply), 0);
}

#[test]
fn test_repeat_participation_allowed() {
    let f = setup();
    let user1 = Address::generate(&f.env);
    let user2 = Address::generate(&f.env);
    let challenge = start(&f, &user1);

    join(&f, &user2, challenge, 0);
    join(&f, &user2, challenge, 0);

    assert_eq!(f.chain.challenge_response_count(&challenge), 2);
    assert_eq!(f.points.get_points(&user2), 20);
}

#[test]
fn test_long_chain_keeps_accepting_joins_and_pages() {
    let f = setup();
    f.env.cost_estimate().budget().reset_unlimited();
    let user1 = Address::generate(&f.env);
    let user2 = Address::generate(&f.env);
    let challenge = start(&f, &user1);
    let root = join(&f, &user2, challenge, 0);

    let total = MAX_PAGE_SIZE + 5;
    for _ in 1..total {
        join(&f, &user2, challenge, root);
    }

    assert_eq!(f.chain.challenge_response_count(&challenge), total);
    assert_eq!(f.chain.child_response_count(&root), total - 1);

    let first_page = f.chain.get_challenge_responses(&challenge, &0, &u32::MAX);
    assert_eq!(first_page.len(), MAX_PAGE_SIZE);
    assert_eq!(first_page.get(0), Some(root));

    let rest = f.chain.get_challenge_responses(&challenge, &MAX_PAGE_SIZE, &MAX_PAGE_SIZE);
    assert_eq!(rest.len(), 5);
    assert_eq!(rest.last(), Some(u64::from(total)));

    let children = f.chain.get_child_responses(&root, &(total - 3), &10);
    assert_eq!(children.len(), 2);
    assert!(f
        .chain
        .get_child_responses(&root, &total, &10)
        .is_empty());
}

#[test]
fn test_paged_getters_reject_unknown_ids() {
    let f = setup();

    assert_eq!(
        f.chain.try_get_challenge_responses(&7, &0, &10),
        Err(Ok(Error::ChallengeNotFound))
    );
    assert_eq!(
        f.chain.try_get_child_responses(&7, &0, &10),
        Err(Ok(Error::ResponseNotFound))
    );
}

#[test]
fn test_empty_prompt_rejected() {
    let f = setup();
    let user = Address::generate(&f.env);

    assert_eq!(
        f.chain.try_start_challenge(&user, &s(&f.env, ""), &s(&f.env, "")),
        Err(Ok(Error::EmptyText))
    );
    assert_eq!(f.chain.total_challenges(), 0);
}

#[test]
fn test_update_points_owner_only() {
    let f = setup();
    let stranger = Address::generate(&f.env);

    assert_eq!(
        f.chain.try_update_points(&stranger, &30, &20),
        Err(Ok(Error::NotOwner))
    );
    f.chain.update_points(&f.owner, &30, &20);
    assert_eq!(f.chain.points_per_challenge(), 30);
    assert_eq!(f.chain.points_per_response(), 20);

    start(&f, &stranger);
    assert_eq!(f.points.get_points(&stranger), 30);
}
