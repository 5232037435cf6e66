extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, String, TryIntoVal, Vec,
};
use vibecaster_badges::{VibeCasterBadges, VibeCasterBadgesClient};
use vibecaster_points::{VibeCasterPoints, VibeCasterPointsClient};

use crate::{
    Error, IcebreakerContract, IcebreakerContractClient, PollVoted, PromptCreated, MAX_PAGE_SIZE,
};

struct Fixture {
    env: Env,
    owner: Address,
    game: IcebreakerContractClient<'static>,
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
    let game_id = env.register(
        IcebreakerContract,
        (owner.clone(), points_id.clone(), badges_id.clone()),
    );

    let f = Fixture {
        game: IcebreakerContractClient::new(&env, &game_id),
        points: VibeCasterPointsClient::new(&env, &points_id),
        badges: VibeCasterBadgesClient::new(&env, &badges_id),
        owner,
        env,
    };
    f.points.authorize_contract(&f.owner, &f.game.address);
    f.badges.authorize_minter(&f.owner, &f.game.address);
    f
}

fn text(env: &Env, value: &str) -> String {
    String::from_str(env, value)
}

fn prompt(f: &Fixture, creator: &Address) -> u64 {
    f.game.create_prompt(
        creator,
        &text(&f.env, "What's your favorite meme?"),
        &text(&f.env, "fun"),
    )
}

fn options(env: &Env, labels: &[&str]) -> Vec<String> {
    let mut out = Vec::new(env);
    for label in labels {
        out.push_back(String::from_str(env, label));
    }
    out
}

fn poll(f: &Fixture, creator: &Address) -> u64 {
    f.game.create_poll(
        creator,
        &text(&f.env, "Best chain?"),
        &options(&f.env, &["Base", "Optimism", "Arbitrum"]),
    )
}

#[test]
fn test_create_prompt_emits_event() {
    let f = setup();
    let creator = Address::generate(&f.env);

    let id = prompt(&f, &creator);

    assert_eq!(id, 1);
    let stored = f.game.get_prompt(&id);
    assert_eq!(stored.creator, creator);
    assert_eq!(stored.category, text(&f.env, "fun"));

    let last_event = f.env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, f.game.address);
    assert_eq!(
        last_event.1,
        vec![&f.env, symbol_short!("prompt").into_val(&f.env), id.into_val(&f.env)]
    );
    let data: PromptCreated = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(data.prompt_id, id);
    assert_eq!(data.text, text(&f.env, "What's your favorite meme?"));

    assert_eq!(f.points.get_points(&creator), 0);
}

#[test]
fn test_response_pays_points_and_badge() {
    let f = setup();
    let creator = Address::generate(&f.env);
    let user = Address::generate(&f.env);
    let first = prompt(&f, &creator);
    let second = prompt(&f, &creator);

    let response_id = f.game.submit_response(
        &user,
        &first,
        &text(&f.env, "Distracted boyfriend"),
        &text(&f.env, ""),
    );
    f.game
        .submit_response(&user, &second, &text(&f.env, "Doge"), &text(&f.env, "QmDoge"));

    assert_eq!(response_id, 1);
    assert_eq!(f.points.get_points(&user), 10);
    assert!(f.badges.has_badge(&user, &text(&f.env, "Ice Breaker")));
    assert_eq!(f.badges.balance_of(&user), 1);
    assert!(f.game.has_responded(&user, &first));
    assert_eq!(f.game.get_prompt_responses(&first, &0, &10), vec![&f.env, 1u64]);
    assert_eq!(f.game.prompt_response_count(&second), 1);
    assert_eq!(f.game.get_response(&2).response_image_ipfs_hash, text(&f.env, "QmDoge"));
}

#[test]
fn test_popular_prompt_pages_responses() {
    let f = setup();
    f.env.cost_estimate().budget().reset_unlimited();
    let creator = Address::generate(&f.env);
    let id = prompt(&f, &creator);

    let total = MAX_PAGE_SIZE + 3;
    for _ in 0..total {
        let user = Address::generate(&f.env);
        f.game
            .submit_response(&user, &id, &text(&f.env, "same"), &text(&f.env, ""));
    }

    assert_eq!(f.game.prompt_response_count(&id), total);
    let page = f.game.get_prompt_responses(&id, &0, &(total * 2));
    assert_eq!(page.len(), MAX_PAGE_SIZE);
    assert_eq!(page.get(0), Some(1));
    let rest = f.game.get_prompt_responses(&id, &MAX_PAGE_SIZE, &10);
    assert_eq!(rest, vec![&f.env, 51u64, 52, 53]);
    assert!(f.game.get_prompt_responses(&99, &0, &10).is_empty());
}

#[test]
fn test_second_response_to_same_prompt_rejected() {
    let f = setup();
    let user = Address::generate(&f.env);
    let id = prompt(&f, &user);

    f.game
        .submit_response(&user, &id, &text(&f.env, "first"), &text(&f.env, ""));
    let result = f
        .game
        .try_submit_response(&user, &id, &text(&f.env, "again"), &text(&f.env, ""));

    assert_eq!(result, Err(Ok(Error::AlreadyResponded)));
    assert_eq!(f.game.total_responses(), 1);
    assert_eq!(f.points.get_points(&user), 5);
}

#[test]
fn test_response_to_missing_prompt() {
    let f = setup();
    let user = Address::generate(&f.env);

    let result = f
        .game
        .try_submit_response(&user, &3, &text(&f.env, "hello"), &text(&f.env, ""));
    assert_eq!(result, Err(Ok(Error::PromptNotFound)));
}

#[test]
fn test_poll_vote_tallies() {
    let f = setup();
    let creator = Address::generate(&f.env);
    let voter = Address::generate(&f.env);
    let id = poll(&f, &creator);

    f.game.vote_poll(&voter, &id, &1);

    let stored = f.game.get_poll(&id);
    assert_eq!(stored.vote_counts, vec![&f.env, 0u32, 1u32, 0u32]);
    assert_eq!(stored.total_votes, 1);
    assert!(f.game.has_voted(&voter, &id));
    assert_eq!(f.points.get_points(&voter), 2);

    let last_event = f.env.events().all().last().expect("No events found");
    let data: PollVoted = last_event.2.try_into_val(&f.env).unwrap();
    assert_eq!(data.option_index, 1);
    assert_eq!(data.total_votes, 1);
}

#[test]
fn test_poll_double_vote_rejected() {
    let f = setup();
    let creator = Address::generate(&f.env);
    let voter = Address::generate(&f.env);
    let id = poll(&f, &creator);

    f.game.vote_poll(&voter, &id, &0);
    assert_eq!(f.game.try_vote_poll(&voter, &id, &2), Err(Ok(Error::AlreadyVoted)));
    assert_eq!(f.game.get_poll(&id).total_votes, 1);
}

#[test]
fn test_poll_option_out_of_range() {
    let f = setup();
    let creator = Address::generate(&f.env);
    let voter = Address::generate(&f.env);
    let id = poll(&f, &creator);

    assert_eq!(f.game.try_vote_poll(&voter, &id, &3), Err(Ok(Error::InvalidOption)));
    assert!(!f.game.has_voted(&voter, &id));
    assert_eq!(f.game.try_vote_poll(&voter, &9, &0), Err(Ok(Error::PollNotFound)));
}

#[test]
fn test_poll_option_count_bounds() {
    let f = setup();
    let creator = Address::generate(&f.env);
    let question = text(&f.env, "Yes?");

    assert_eq!(
        f.game
            .try_create_poll(&creator, &question, &options(&f.env, &["only"])),
        Err(Ok(Error::TooFewOptions))
    );
    let eleven = options(
        &f.env,
        &["a", "b", "c", "d", "e", "f", "g", "h", "i", "j", "k"],
    );
    assert_eq!(
        f.game.try_create_poll(&creator, &question, &eleven),
        Err(Ok(Error::TooManyOptions))
    );
    assert_eq!(
        f.game
            .try_create_poll(&creator, &question, &options(&f.env, &["yes", ""])),
        Err(Ok(Error::EmptyText))
    );
    assert_eq!(f.game.total_polls(), 0);
}

#[test]
fn test_add_category_owner_only() {
    let f = setup();
    let stranger = Address::generate(&f.env);
    let name = text(&f.env, "Deep");
    let description = text(&f.env, "Serious questions");

    assert_eq!(
        f.game.try_add_category(&stranger, &name, &description),
        Err(Ok(Error::NotOwner))
    );

    let id = f.game.add_category(&f.owner, &name, &description);
    assert_eq!(id, 1);
    assert_eq!(f.game.get_category(&id).name, name);
    assert_eq!(f.game.try_get_category(&2), Err(Ok(Error::CategoryNotFound)));
}

#[test]
fn test_update_points_and_stats() {
    let f = setup();
    let user = Address::generate(&f.env);

    assert_eq!(f.game.try_update_points(&user, &9, &9), Err(Ok(Error::NotOwner)));
    f.game.update_points(&f.owner, &7, &0);
    assert_eq!(f.game.points_per_response(), 7);
    assert_eq!(f.game.points_per_poll_vote(), 0);

    let prompt_id = prompt(&f, &user);
    let poll_id = poll(&f, &user);
    f.game
        .submit_response(&user, &prompt_id, &text(&f.env, "hi"), &text(&f.env, ""));
    f.game.vote_poll(&user, &poll_id, &0);
    assert_eq!(f.points.get_points(&user), 7);

    let stats = f.game.get_stats();
    assert_eq!(stats.total_categories, 0);
    assert_eq!(stats.total_prompts, 1);
    assert_eq!(stats.total_responses, 1);
    assert_eq!(stats.total_polls, 1);
}
