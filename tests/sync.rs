#![cfg(not(target_arch = "wasm32"))]

use proptest::prelude::*;
use resultify::{resultify_sync, Outcome};
use serde_json::{json, Value};
use std::cell::Cell;

#[test]
fn parses_json() {
    let parse =
        resultify_sync(|text: &str| serde_json::from_str::<Value>(text));

    let Outcome { err, data } = parse.call("\"valid\"");
    assert!(err.is_none());
    assert_eq!(data, Some(json!("valid")));

    let Outcome { err, data } = parse.call("BADDD");
    assert!(err.unwrap().is_syntax());
    assert_eq!(data, None);
}

#[test]
fn receiver_travels_with_arguments() {
    struct Budget {
        left: Cell<u32>,
    }

    impl Budget {
        fn spend(&self, amount: u32) -> Result<u32, String> {
            let left = self.left.get();
            if amount > left {
                return Err(format!("only {} left", left));
            }
            self.left.set(left - amount);
            Ok(left - amount)
        }
    }

    let budget = Budget { left: Cell::new(10) };
    let spend = resultify_sync(|(budget, amount): (&Budget, u32)| {
        budget.spend(amount)
    });

    assert_eq!(spend.call((&budget, 4)), Outcome::success(6));
    assert_eq!(
        spend.call((&budget, 7)),
        Outcome::failure("only 6 left".to_owned())
    );
    assert_eq!(budget.left.get(), 6);
}

#[test]
fn rewrapping_keeps_outcome_contract() {
    let inner = resultify_sync(|n: i32| n.checked_neg().ok_or("overflow"));
    let outer = resultify_sync(move |n: i32| Ok::<_, ()>(inner.call(n)));

    assert_eq!(outer.call(3), Outcome::success(Outcome::success(-3)));
    assert_eq!(
        outer.call(i32::MIN),
        Outcome::success(Outcome::failure("overflow"))
    );
}

proptest! {
    #[test]
    fn ok_becomes_data(value in any::<i64>()) {
        let identity = resultify_sync(|n: i64| Ok::<_, String>(n));
        prop_assert_eq!(identity.call(value), Outcome::success(value));
    }

    #[test]
    fn err_becomes_err(message in ".*") {
        let reject = resultify_sync(|text: String| Err::<(), _>(text));
        let Outcome { err, data } = reject.call(message.clone());
        prop_assert_eq!(err, Some(message));
        prop_assert_eq!(data, None);
    }
}
