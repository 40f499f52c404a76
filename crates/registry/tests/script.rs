//! The read-only surface handed to the scripting layer.

use std::sync::Arc;

use ultimate_registry::builder::{BlockBuilder, ItemBuilder};
use ultimate_registry::script::{ScriptBridge, ScriptRegistry};
use ultimate_registry::{GameRegistry, NoopHooks};

#[test]
fn bridge_sees_registrations() {
    let reg = Arc::new(GameRegistry::new_isolated_for_tests(Arc::new(NoopHooks)));
    let block = reg.register_new_block("a:glow", &BlockBuilder::new()).unwrap();
    let item = reg.register_new_item("a:dust", &ItemBuilder::new()).unwrap();

    let bridge: Box<dyn ScriptRegistry> = Box::new(ScriptBridge::new(Arc::clone(&reg)));
    assert_eq!(bridge.get_registered_block("a:glow"), Some(block.clone()));
    assert_eq!(bridge.get_registered_block_by_id(block.id.0), Some(block.clone()));
    assert_eq!(bridge.get_registered_item("a:dust"), Some(item.clone()));
    assert_eq!(bridge.get_registered_item_by_id(item.id.0), Some(item));
    assert_eq!(bridge.get_max_block_id(), block.id.0);
    assert_eq!(bridge.translate_key("x.y"), "x.y");
    assert!(!bridge.is_frozen());

    reg.freeze();
    assert!(bridge.is_frozen());
}

#[test]
fn bridge_exposes_conversions_with_sentinel() {
    let reg = Arc::new(GameRegistry::new_isolated_for_tests(Arc::new(NoopHooks)));
    let bridge = ScriptBridge::new(reg);
    assert_eq!(bridge.convert_block_id_to_item_id(400), 1144);
    assert_eq!(bridge.convert_item_id_to_block_id(1144), 400);
    assert_eq!(bridge.convert_item_id_to_block_id(500), -1);
}
