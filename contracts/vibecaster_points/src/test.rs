extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::{Error, PointsEarned, VibeCasterPoints, VibeCasterPointsClient};

fn setup() -> (Env, VibeCasterPointsClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let owner = Address::generate(&env);
    let contract_id = env.register(VibeCasterPoints, (owner.clone(),));
    let client = VibeCasterPointsClient::new(&env, &contract_id);
    (env, client, owner)
}

fn reason(env: &Env, text: &str) -> String {
    String::from_str(env, text)
}

#[test]
fn test_owner_awards_and_deducts_points() {
    let (env, client, owner) = setup();
    let user = Address::generate(&env);

    assert_eq!(client.earn_points(&owner, &user, &10, &reason(&env, "roast")), 10);
    assert_eq!(client.deduct_points(&owner, &user, &5, &reason(&env, "Test deduction")), 5);

    assert_eq!(client.get_points(&user), 5);
    assert_eq!(client.total_issued(), 10);
    assert_eq!(client.total_deducted(), 5);
}

#[test]
fn test_authorized_contract_can_award() {
    let (env, client, owner) = setup();
    let game = Address::generate(&env);
    let user = Address::generate(&env);

    client.authorize_contract(&owner, &game);
    assert!(client.is_authorized(&game));

    client.earn_points(&game, &user, &15, &reason(&env, "challenge"));
    assert_eq!(client.get_points(&user), 15);
}

#[test]
fn test_unauthorized_caller_is_rejected() {
    let (env, client, _owner) = setup();
    let user = Address::generate(&env);

    let result = client.try_earn_points(&user, &user, &10, &reason(&env, "Test"));
    assert_eq!(result, Err(Ok(Error::NotAuthorized)));

    let result = client.try_deduct_points(&user, &user, &1, &reason(&env, "Test"));
    assert_eq!(result, Err(Ok(Error::NotAuthorized)));
    assert_eq!(client.get_points(&user), 0);
}

#[test]
fn test_deauthorized_contract_loses_access() {
    let (env, client, owner) = setup();
    let game = Address::generate(&env);
    let user = Address::generate(&env);

    client.authorize_contract(&owner, &game);
    client.deauthorize_contract(&owner, &game);

    assert!(!client.is_authorized(&game));
    let result = client.try_earn_points(&game, &user, &1, &reason(&env, "late"));
    assert_eq!(result, Err(Ok(Error::NotAuthorized)));
}

#[test]
fn test_only_owner_manages_allow_list() {
    let (env, client, _owner) = setup();
    let stranger = Address::generate(&env);

    let result = client.try_authorize_contract(&stranger, &stranger);
    assert_eq!(result, Err(Ok(Error::NotOwner)));
}

#[test]
fn test_balance_never_goes_negative() {
    let (env, client, owner) = setup();
    let user = Address::generate(&env);

    client.earn_points(&owner, &user, &3, &reason(&env, "vote"));
    let result = client.try_deduct_points(&owner, &user, &4, &reason(&env, "too much"));

    assert_eq!(result, Err(Ok(Error::InsufficientPoints)));
    assert_eq!(client.get_points(&user), 3);
    assert_eq!(client.total_deducted(), 0);
}

#[test]
fn test_zero_amount_rejected() {
    let (env, client, owner) = setup();
    let user = Address::generate(&env);

    let result = client.try_earn_points(&owner, &user, &0, &reason(&env, "nothing"));
    assert_eq!(result, Err(Ok(Error::InvalidAmount)));
}

#[test]
fn test_overlong_reason_rejected() {
    let (env, client, owner) = setup();
    let user = Address::generate(&env);
    let long = String::from_str(&env, &"r".repeat(121));

    let result = client.try_earn_points(&owner, &user, &1, &long);
    assert_eq!(result, Err(Ok(Error::ReasonTooLong)));
}

#[test]
fn test_earned_event() {
    let (env, client, owner) = setup();
    let user = Address::generate(&env);

    client.earn_points(&owner, &user, &7, &reason(&env, "bonus"));

    let last_event = env.events().all().last().expect("No events found");
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![
        &env,
        symbol_short!("earned").into_val(&env),
        user.into_val(&env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let data: PointsEarned = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        PointsEarned {
            user: user.clone(),
            issuer: owner,
            amount: 7,
            reason: reason(&env, "bonus"),
            new_balance: 7,
        }
    );
}

#[test]
fn test_transfer_ownership() {
    let (env, client, owner) = setup();
    let next_owner = Address::generate(&env);

    client.transfer_ownership(&owner, &next_owner);
    assert_eq!(client.owner(), Some(next_owner.clone()));

    let result = client.try_authorize_contract(&owner, &next_owner);
    assert_eq!(result, Err(Ok(Error::NotOwner)));
}
