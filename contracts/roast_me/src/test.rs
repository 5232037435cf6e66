extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, String, TryIntoVal,
};
use vibecaster_badges::{VibeCasterBadges, VibeCasterBadgesClient};
use vibecaster_points::{VibeCasterPoints, VibeCasterPointsClient};

use crate::{
    Error, RoastMeContract, RoastMeContractClient, RoastSubmitted, CERTIFIED_FUNNY_VOTES,
};

struct Fixture {
    env: Env,
    owner: Address,
    roast: RoastMeContractClient<'static>,
    points: VibeCasterPointsClient<'static>,
    badges: VibeCasterBadgesClient<'static>,
}

fn setup_unwired() -> Fixture {
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
    let roast_id = env.register(
        RoastMeContract,
        (owner.clone(), points_id.clone(), badges_id.clone()),
    );

    Fixture {
        roast: RoastMeContractClient::new(&env, &roast_id),
        points: VibeCasterPointsClient::new(&env, &points_id),
        badges: VibeCasterBadgesClient::new(&env, &badges_id),
        owner,
        env,
    }
}

fn setup() -> Fixture {
    let f = setup_unwired();
    f.points.authorize_contract(&f.owner, &f.roast.address);
    f.badges.authorize_minter(&f.owner, &f.roast.address);
    f
}

fn hash(env: &Env, text: &str) -> String {
    String::from_str(env, text)
}

fn submit(f: &Fixture, user: &Address) -> u64 {
    f.roast
        .submit_roast(user, &hash(&f.env, "QmHash1"), &hash(&f.env, "QmHash2"))
}

#[test]
fn test_submit_roast_records_and_rewards() {
    let f = setup();
    let user1 = Address::generate(&f.env);

    let id = submit(&f, &user1);

    assert_eq!(id, 1);
    let roast = f.roast.get_roast(&id);
    assert_eq!(roast.submitter, user1);
    assert_eq!(roast.original_image_ipfs_hash, hash(&f.env, "QmHash1"));
    assert_eq!(roast.roast_ipfs_hash, hash(&f.env, "QmHash2"));
    assert_eq!(roast.funny_votes, 0);
    assert_eq!(roast.meh_votes, 0);

    assert_eq!(f.points.get_points(&user1), 10);
    assert_eq!(f.roast.total_roasts(), 1);
    assert_eq!(f.roast.get_user_roasts(&user1, &0, &10), vec![&f.env, 1u64]);
    assert_eq!(f.roast.user_roast_count(&user1), 1);
}

#[test]
fn test_first_roast_badge_minted_once() {
    let f = setup();
    let user1 = Address::generate(&f.env);

    submit(&f, &user1);
    submit(&f, &user1);

    assert!(f.badges.has_badge(&user1, &String::from_str(&f.env, "First Roast")));
    assert_eq!(f.badges.balance_of(&user1), 1);
    assert_eq!(f.points.get_points(&user1), 20);
    assert_eq!(f.roast.get_user_roasts(&user1, &1, &5), vec![&f.env, 2u64]);
    assert!(f.roast.get_user_roasts(&user1, &2, &5).is_empty());
}

#[test]
fn test_roast_submitted_event() {
    let f = setup();
    let user1 = Address::generate(&f.env);

    let id = submit(&f, &user1);

    let last_event = f.env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, f.roast.address);
    assert_eq!(
        last_event.1,
        vec![&f.env, symbol_short!("roast").into_val(&f.env), id.into_val(&f.env)]
    );
    let data: RoastSubmitted = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(data.roast_id, id);
    assert_eq!(data.submitter, user1);
}

#[test]
fn test_funny_vote_pays_voter_and_submitter() {
    let f = setup();
    let user1 = Address::generate(&f.env);
    let user2 = Address::generate(&f.env);

    submit(&f, &user1);
    f.roast.vote_roast(&user2, &1, &true);

    let roast = f.roast.get_roast(&1);
    assert_eq!(roast.funny_votes, 1);
    assert_eq!(roast.meh_votes, 0);
    assert_eq!(f.points.get_points(&user2), 1);
    assert_eq!(f.points.get_points(&user1), 15);
    assert!(f.roast.has_voted(&user2, &1));
}

#[test]
fn test_meh_vote_pays_only_voter() {
    let f = setup();
    let user1 = Address::generate(&f.env);
    let user2 = Address::generate(&f.env);

    submit(&f, &user1);
    f.roast.vote_roast(&user2, &1, &false);

    let roast = f.roast.get_roast(&1);
    assert_eq!(roast.meh_votes, 1);
    assert_eq!(f.points.get_points(&user2), 1);
    assert_eq!(f.points.get_points(&user1), 10);
}

#[test]
fn test_cannot_vote_on_own_roast() {
    let f = setup();
    let user1 = Address::generate(&f.env);

    submit(&f, &user1);
    let result = f.roast.try_vote_roast(&user1, &1, &true);

    assert_eq!(result, Err(Ok(Error::CannotVoteOwnRoast)));
    assert_eq!(f.points.get_points(&user1), 10);
}

#[test]
fn test_double_voting_prevented() {
    let f = setup();
    let user1 = Address::generate(&f.env);
    let user2 = Address::generate(&f.env);

    submit(&f, &user1);
    f.roast.vote_roast(&user2, &1, &true);
    let result = f.roast.try_vote_roast(&user2, &1, &false);

    assert_eq!(result, Err(Ok(Error::AlreadyVoted)));
    let roast = f.roast.get_roast(&1);
    assert_eq!(roast.funny_votes, 1);
    assert_eq!(roast.meh_votes, 0);
}

#[test]
fn test_vote_on_missing_roast() {
    let f = setup();
    let user = Address::generate(&f.env);

    assert_eq!(f.roast.try_vote_roast(&user, &7, &true), Err(Ok(Error::RoastNotFound)));
    assert_eq!(f.roast.try_get_roast(&7), Err(Ok(Error::RoastNotFound)));
}

#[test]
fn test_empty_hash_rejected() {
    let f = setup();
    let user = Address::generate(&f.env);

    let result = f
        .roast
        .try_submit_roast(&user, &hash(&f.env, ""), &hash(&f.env, "QmHash2"));
    assert_eq!(result, Err(Ok(Error::InvalidIpfsHash)));
    assert_eq!(f.roast.total_roasts(), 0);
}

#[test]
fn test_certified_funny_badge() {
    let f = setup();
    let submitter = Address::generate(&f.env);
    submit(&f, &submitter);

    for _ in 0..CERTIFIED_FUNNY_VOTES {
        let voter = Address::generate(&f.env);
        f.roast.vote_roast(&voter, &1, &true);
    }

    assert!(f
        .badges
        .has_badge(&submitter, &String::from_str(&f.env, "Certified Funny")));
    assert_eq!(f.badges.balance_of(&submitter), 2);
}

#[test]
fn test_update_points_owner_only() {
    let f = setup();
    let stranger = Address::generate(&f.env);

    assert_eq!(
        f.roast.try_update_points(&stranger, &20, &2, &10),
        Err(Ok(Error::NotOwner))
    );

    f.roast.update_points(&f.owner, &20, &2, &10);
    assert_eq!(f.roast.points_per_roast(), 20);
    assert_eq!(f.roast.points_per_vote(), 2);
    assert_eq!(f.roast.points_per_funny_vote(), 10);

    let user = Address::generate(&f.env);
    submit(&f, &user);
    assert_eq!(f.points.get_points(&user), 20);
}

#[test]
fn test_zero_schedule_skips_award() {
    let f = setup();
    let user1 = Address::generate(&f.env);
    let user2 = Address::generate(&f.env);

    f.roast.update_points(&f.owner, &10, &0, &5);
    submit(&f, &user1);
    f.roast.vote_roast(&user2, &1, &true);

    assert_eq!(f.points.get_points(&user2), 0);
    assert_eq!(f.points.get_points(&user1), 15);
}

#[test]
fn test_unauthorized_game_reverts_submission() {
    let f = setup_unwired();
    let user = Address::generate(&f.env);

    let result = f
        .roast
        .try_submit_roast(&user, &hash(&f.env, "QmHash1"), &hash(&f.env, "QmHash2"));

    assert!(result.is_err());
    assert_eq!(f.roast.total_roasts(), 0);
    assert_eq!(f.points.get_points(&user), 0);
}
