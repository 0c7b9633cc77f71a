use counter_deployment::counter_module::{self, COUNTER_OUTPUT, MODULE_NAME};
use module_builder::{
    args, build_module, ActionKind, ArgumentValue, ModuleError, Outputs, ResourceKind, U256,
};

#[test]
fn test_outputs_expose_only_the_counter() {
    let module = counter_module::descriptor().unwrap();

    assert_eq!(module.name(), MODULE_NAME);
    assert_eq!(module.outputs().len(), 1);
    let counter = module.outputs().get(COUNTER_OUTPUT).expect("counter output");
    assert_eq!(counter.contract_name(), "Counter");
    assert_eq!(counter.module(), "CounterModule");

    // the output points at the single declared resource
    assert_eq!(module.resources().len(), 1);
    let resource = &module.resources()[0];
    assert_eq!(resource.id, *counter.id());
    assert_eq!(resource.contract_name, "Counter");
    assert_eq!(resource.kind, ResourceKind::Deploy { args: vec![] });
    assert!(resource.dependencies.is_empty());
}

#[test]
fn test_single_inc_by_action() {
    let module = counter_module::descriptor().unwrap();
    let counter = module.outputs().get(COUNTER_OUTPUT).unwrap();

    assert_eq!(module.actions().len(), 1);
    let action = &module.actions()[0];
    assert_eq!(action.kind, ActionKind::Call);
    assert_eq!(action.method, "incBy");
    assert_eq!(action.contract, *counter.id());
    assert_eq!(action.args, vec![ArgumentValue::Uint(U256::from(5u64))]);
    assert_eq!(action.value, None);

    let on_counter: Vec<_> = module.actions_on(counter).collect();
    assert_eq!(on_counter.len(), 1);
}

#[test]
fn test_rebuild_is_deterministic() {
    let first = counter_module::descriptor().unwrap();
    let second = counter_module::descriptor().unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_counter_handle_is_unknown_elsewhere() {
    let module = counter_module::descriptor().unwrap();
    let counter = module.outputs().get(COUNTER_OUTPUT).unwrap().clone();

    let err = build_module("Downstream", |m| {
        m.call(&counter, "incBy", args![1u64])?;
        Ok(Outputs::new())
    })
    .unwrap_err();
    assert!(matches!(err, ModuleError::UnknownHandle { ref module, .. } if module == "Downstream"));

    // importing the module makes the same handle valid
    let downstream = build_module("Downstream", |m| {
        let outputs = m.use_module(&module)?;
        let counter = outputs.get(COUNTER_OUTPUT).unwrap().clone();
        m.call(&counter, "incBy", args![1u64])?;
        Ok(outputs)
    })
    .unwrap();
    assert_eq!(
        downstream.actions()[0].id.as_str(),
        "Downstream#CounterModule~Counter.incBy"
    );
}

#[test]
fn test_second_counter_is_a_duplicate_resource() {
    let err = build_module(MODULE_NAME, |m| {
        let counter = m.contract("Counter")?;
        m.call(&counter, "incBy", args![5u64])?;
        m.contract("Counter")?;
        Ok(Outputs::new().with(COUNTER_OUTPUT, &counter))
    })
    .unwrap_err();
    assert_eq!(err.to_string(), "Duplicate resource name CounterModule#Counter in module CounterModule");
}
