use tether_types::BindingContext;

#[tokio::test]
async fn current_resolves_inside_runtime() {
    let ctx = BindingContext::current().unwrap();
    // The resolved handle must be usable for spawning.
    let joined = ctx.runtime().spawn(async { 41 + 1 }).await.unwrap();
    assert_eq!(joined, 42);
}

#[test]
fn current_fails_outside_runtime() {
    let result = BindingContext::current();
    assert!(result.is_err());
}

#[tokio::test]
async fn explicit_handle_round_trips() {
    let handle = tokio::runtime::Handle::current();
    let ctx = BindingContext::new(handle);
    let joined = ctx.runtime().spawn(async { "ok" }).await.unwrap();
    assert_eq!(joined, "ok");
}
