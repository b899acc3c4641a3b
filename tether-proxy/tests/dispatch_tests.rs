use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tether_proxy::{
    create_proxy, Dispatcher, Facade, FacadeRegistry, MethodCall, ProxyError, ProxyResult,
};

/// A hand-written facade: every method body forwards to the dispatcher.
struct EchoFacade {
    dispatcher: Dispatcher,
}

impl Facade for EchoFacade {
    fn from_dispatcher(dispatcher: Dispatcher) -> Self {
        Self { dispatcher }
    }
}

impl EchoFacade {
    fn echo(&self, text: &str) -> ProxyResult<Value> {
        self.dispatcher.call("echo", vec![json!(text)])
    }

    fn ping(&self) -> ProxyResult<Value> {
        self.dispatcher.call("ping", Vec::new())
    }
}

// ── MethodCall ───────────────────────────────────────────────────

#[test]
fn call_builder_accumulates_args() {
    let call = MethodCall::new("set").arg("server.name").arg(json!(42));
    assert_eq!(call.name(), "set");
    assert_eq!(call.arity(), 2);
    assert_eq!(call.args()[0], json!("server.name"));
    assert_eq!(call.args()[1], json!(42));
}

#[test]
fn zero_arg_call() {
    let call = MethodCall::new("save");
    assert_eq!(call.arity(), 0);
    assert!(call.args().is_empty());
}

// ── Dispatch forwarding ──────────────────────────────────────────

#[test]
fn every_call_reaches_the_route() {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_in_route = Arc::clone(&hits);

    let facade: EchoFacade = create_proxy(move |call| {
        hits_in_route.fetch_add(1, Ordering::SeqCst);
        Ok(json!(call.name()))
    });

    facade.ping().unwrap();
    facade.echo("hello").unwrap();
    facade.ping().unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[test]
fn route_sees_name_and_args() {
    let facade: EchoFacade = create_proxy(|call| {
        assert_eq!(call.name(), "echo");
        assert_eq!(call.args(), &[json!("payload")]);
        Ok(json!("echoed"))
    });

    assert_eq!(facade.echo("payload").unwrap(), json!("echoed"));
}

#[test]
fn route_errors_propagate_synchronously() {
    let facade: EchoFacade = create_proxy(|call| {
        Err(ProxyError::UnregisteredMethod {
            name: call.name().to_string(),
        })
    });

    let err = facade.ping().unwrap_err();
    assert!(matches!(err, ProxyError::UnregisteredMethod { name } if name == "ping"));
}

#[test]
fn cloned_dispatcher_shares_the_route() {
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_in_route = Arc::clone(&hits);

    let dispatcher = Dispatcher::new(move |_| {
        hits_in_route.fetch_add(1, Ordering::SeqCst);
        Ok(Value::Null)
    });
    let clone = dispatcher.clone();

    dispatcher.call("a", Vec::new()).unwrap();
    clone.call("b", Vec::new()).unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

// ── Registry / UnsupportedTarget ─────────────────────────────────

#[test]
fn registered_target_instantiates() {
    let mut registry = FacadeRegistry::new();
    registry.register::<EchoFacade>("EchoFacade");
    assert!(registry.contains("EchoFacade"));

    let instance = registry
        .instantiate("EchoFacade", Dispatcher::new(|_| Ok(json!("ok"))))
        .unwrap();
    let facade = instance.downcast_ref::<EchoFacade>().unwrap();
    assert_eq!(facade.ping().unwrap(), json!("ok"));
}

#[test]
fn unregistered_target_is_unsupported() {
    let registry = FacadeRegistry::new();
    let err = registry
        .instantiate("NotACapability", Dispatcher::new(|_| Ok(Value::Null)))
        .unwrap_err();
    assert!(matches!(err, ProxyError::UnsupportedTarget(name) if name == "NotACapability"));
}
