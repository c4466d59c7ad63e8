#![cfg(not(target_arch = "wasm32"))]

use resultify::{resultify_unwind, Outcome};

#[test]
fn returns_value() {
    let index = resultify_unwind(|i: usize| [10, 20, 30][i]);
    assert_eq!(index.call(2).data, Some(30));
    assert!(index.call(2).is_ok());
}

#[test]
fn catches_panic() {
    let explode = resultify_unwind(|code: u8| -> u8 {
        panic!("exploded with {}", code)
    });
    let Outcome { err, data } = explode.call(7);
    let panicked = err.unwrap();
    assert_eq!(panicked.message(), Some("exploded with 7"));
    assert_eq!(panicked.to_string(), "operation panicked: exploded with 7");
    assert_eq!(data, None);
}

#[test]
fn static_str_message() {
    let explode = resultify_unwind(|()| -> () { panic!("static") });
    assert_eq!(explode.call(()).err.unwrap().message(), Some("static"));
}

#[test]
#[should_panic(expected = "resumed")]
fn resume_rethrows() {
    let explode = resultify_unwind(|()| -> () { panic!("resumed") });
    if let Some(panicked) = explode.call(()).err {
        panicked.resume();
    }
}
