#![cfg(not(target_arch = "wasm32"))]

use futures::{
    channel::oneshot,
    executor::block_on,
    future::{self, Ready},
    poll,
};
use resultify::{
    resultify,
    resultify_p,
    resultify_promise,
    Callback,
    Outcome,
};
use std::{any, cell::RefCell, rc::Rc};

async fn sleep_then(value: &'static str) -> Result<&'static str, String> {
    future::ready(()).await;
    Ok(value)
}

#[test]
fn fulfilled() {
    block_on(async {
        let sleep = resultify_promise(sleep_then);
        let Outcome { err, data } = sleep.call("woke").await;
        assert_eq!(err, None);
        assert_eq!(data, Some("woke"));
    });
}

#[test]
fn rejected() {
    block_on(async {
        let reject = resultify_p(|code: i32| {
            future::ready(Err::<(), _>(format!("status {}", code)))
        });
        let Outcome { err, data } = reject.call(404).await;
        assert_eq!(err.as_deref(), Some("status 404"));
        assert_eq!(data, None);
    });
}

#[test]
fn unit_value_is_data() {
    block_on(async {
        let nothing = resultify_promise(|()| future::ok::<(), String>(()));
        assert_eq!(nothing.call(()).await, Outcome::success(()));
    });
}

#[test]
fn pending_until_settled() {
    let senders = Rc::new(RefCell::new(Vec::new()));
    let stash = senders.clone();
    let wait = resultify_promise(move |()| {
        let (sender, receiver) = oneshot::channel::<Result<u8, String>>();
        stash.borrow_mut().push(sender);
        async move { receiver.await.unwrap_or_else(|_| Err("gone".into())) }
    });

    block_on(async {
        let mut settle = Box::pin(wait.call(()));
        assert!(poll!(settle.as_mut()).is_pending());

        let sender = senders.borrow_mut().pop().unwrap();
        sender.send(Ok(9)).unwrap();
        assert_eq!(settle.await, Outcome::success(9));
    });
}

#[test]
fn alias_is_same_function() {
    type Original = fn(u32) -> Ready<Result<u32, String>>;

    type Returned = Ready<Result<u32, String>>;

    let alias = resultify_p::<Original, u32, Returned, u32, String>;
    let canonical = resultify_promise::<Original, u32, Returned, u32, String>;
    assert_eq!(
        any::type_name_of_val(&alias),
        any::type_name_of_val(&canonical)
    );

    let original: Original = |n| future::ok(n + 1);
    block_on(async {
        let via_alias = alias(original).call(1).await;
        let via_canonical = canonical(original).call(1).await;
        assert_eq!(via_alias, via_canonical);
        assert_eq!(via_alias, Outcome::success(2));
    });
}

#[test]
fn rewrapping_keeps_outcome_contract() {
    let inner = resultify(|n: u32, done: Callback<u32, String>| done.ok(n + 1));
    let outer = resultify_promise(move |n: u32| {
        let settle = inner.call(n);
        async move { Ok::<_, String>(settle.await) }
    });

    block_on(async {
        let Outcome { err, data } = outer.call(1).await;
        assert!(err.is_none());
        assert_eq!(data, Some(Outcome::success(2)));
    });
}
