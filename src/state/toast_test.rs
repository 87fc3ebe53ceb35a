use super::*;

#[test]
fn push_appends_in_order_with_distinct_ids() {
    let mut state = ToastState::default();
    let first = state.push("One", "first", ToastVariant::Info);
    let second = state.push("Two", "second", ToastVariant::Destructive);

    assert_ne!(first, second);
    assert_eq!(state.toasts.len(), 2);
    assert_eq!(state.toasts[0].title, "One");
    assert_eq!(state.toasts[1].variant, ToastVariant::Destructive);
}

#[test]
fn dismiss_removes_only_the_matching_toast() {
    let mut state = ToastState::default();
    let first = state.push("One", "first", ToastVariant::Info);
    let _second = state.push("Two", "second", ToastVariant::Info);

    state.dismiss(&first);

    assert_eq!(state.toasts.len(), 1);
    assert_eq!(state.toasts[0].title, "Two");
}

#[test]
fn dismiss_of_unknown_id_is_a_no_op() {
    let mut state = ToastState::default();
    state.push("One", "first", ToastVariant::Info);

    state.dismiss("missing");

    assert_eq!(state.toasts.len(), 1);
}
