extern crate std;

use soroban_sdk::{
    contract, contractimpl, contracttype, symbol_short,
    testutils::{Address as _, Events},
    vec, Address, Env, IntoVal, String, TryIntoVal,
};

use crate::ownable::{self, OwnerChanged};
use crate::paging::{self, MAX_PAGE_SIZE};
use crate::text::{check_len, check_optional_len, TextCheck, MAX_NAME_LEN};
use crate::ttl::{next_id, read_count};

#[contracttype]
#[derive(Clone)]
enum TestKey {
    Counter,
    ItemCount,
    Item(u32),
}

#[contract]
pub struct Host;

#[contractimpl]
impl Host {
    pub fn ping(_env: Env) -> u32 {
        1
    }
}

fn setup() -> (Env, Address) {
    let env = Env::default();
    let id = env.register(Host, ());
    (env, id)
}

#[test]
fn test_ids_start_at_one_and_increment() {
    let (env, id) = setup();
    env.as_contract(&id, || {
        assert_eq!(read_count(&env, &TestKey::Counter), 0);
        assert_eq!(next_id(&env, &TestKey::Counter), 1);
        assert_eq!(next_id(&env, &TestKey::Counter), 2);
        assert_eq!(read_count(&env, &TestKey::Counter), 2);
    });
}

#[test]
fn test_ownership_transfer_replaces_owner_and_emits_event() {
    let (env, id) = setup();
    let first = Address::generate(&env);
    let second = Address::generate(&env);

    env.as_contract(&id, || {
        assert_eq!(ownable::read_owner(&env), None);
        ownable::write_owner(&env, &first);
        assert!(ownable::is_owner(&env, &first));

        ownable::transfer_ownership(&env, &second);
        assert!(!ownable::is_owner(&env, &first));
        assert!(ownable::is_owner(&env, &second));
    });

    let last = env.events().all().last().expect("no events");
    assert_eq!(last.0, id);
    assert_eq!(last.1, vec![&env, symbol_short!("owner_set").into_val(&env)]);
    let data: OwnerChanged = last.2.try_into_val(&env).unwrap();
    assert_eq!(
        data,
        OwnerChanged {
            previous_owner: Some(first),
            new_owner: second,
        }
    );
}

#[test]
fn test_text_checks() {
    let env = Env::default();
    let empty = String::from_str(&env, "");
    let short = String::from_str(&env, "truth");
    let long = String::from_str(&env, &"x".repeat(MAX_NAME_LEN as usize + 1));

    assert_eq!(check_len(&empty, MAX_NAME_LEN), TextCheck::Empty);
    assert_eq!(check_len(&short, MAX_NAME_LEN), TextCheck::Ok);
    assert_eq!(check_len(&long, MAX_NAME_LEN), TextCheck::TooLong);

    assert_eq!(check_optional_len(&empty, MAX_NAME_LEN), TextCheck::Ok);
    assert_eq!(check_optional_len(&long, MAX_NAME_LEN), TextCheck::TooLong);
}

#[test]
fn test_paged_list_appends_and_slices() {
    let (env, id) = setup();
    env.as_contract(&id, || {
        let len_key = TestKey::ItemCount;
        assert_eq!(paging::len(&env, &len_key), 0);
        for n in 1..=60u64 {
            let len = paging::append(&env, &len_key, TestKey::Item, n * 10);
            assert_eq!(u64::from(len), n);
        }
        let len = paging::len(&env, &len_key);
        assert_eq!(len, 60);

        let first = paging::read_page(&env, len, 0, 3, TestKey::Item);
        assert_eq!(first, vec![&env, 10u64, 20, 30]);

        let tail = paging::read_page(&env, len, 58, 10, TestKey::Item);
        assert_eq!(tail, vec![&env, 590u64, 600]);

        let capped = paging::read_page(&env, len, 0, u32::MAX, TestKey::Item);
        assert_eq!(capped.len(), MAX_PAGE_SIZE);
        assert_eq!(capped.last(), Some(500));

        assert!(paging::read_page(&env, len, 60, 5, TestKey::Item).is_empty());
        assert!(paging::read_page(&env, len, u32::MAX, 5, TestKey::Item).is_empty());
    });
}
