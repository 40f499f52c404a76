//! Scratch block arrays before and after the content freeze.

use std::sync::Arc;

use ultimate_registry::builder::BlockBuilder;
use ultimate_registry::{GameRegistry, NoopHooks};

fn registry() -> GameRegistry {
    GameRegistry::new_isolated_for_tests(Arc::new(NoopHooks))
}

#[test]
fn fresh_arrays_before_freeze() {
    let reg = registry();
    reg.register_new_block("a:b", &BlockBuilder::new()).unwrap();
    let len = reg.get_max_block_id() as usize + 1;

    let mut a = reg.temporary_block_array();
    let b = reg.temporary_block_array();
    assert_eq!(a.len(), len);
    assert_eq!(b.len(), len);
    assert_ne!(a.as_ptr(), b.as_ptr());
    assert!(!a.is_pooled());

    a[0] = 7;
    assert_eq!(b[0], 0);
}

#[test]
fn arrays_grow_with_block_ids_before_freeze() {
    let reg = registry();
    let before = reg.temporary_block_array().len();
    reg.register_new_block("a:b0", &BlockBuilder::new()).unwrap();
    reg.register_new_block("a:b1", &BlockBuilder::new()).unwrap();
    assert_eq!(reg.temporary_block_array().len(), before + 2);
}

#[test]
fn same_array_reused_after_freeze() {
    let reg = registry();
    reg.register_new_block("a:b", &BlockBuilder::new()).unwrap();
    reg.freeze();
    let len = reg.get_max_block_id() as usize + 1;

    let first_ptr = {
        let mut array = reg.temporary_block_array();
        assert!(array.is_pooled());
        assert_eq!(array.len(), len);
        array.iter_mut().for_each(|v| *v = 9);
        array.as_ptr()
    };

    let array = reg.temporary_block_array();
    assert_eq!(array.as_ptr(), first_ptr);
    assert_eq!(array.len(), len);
    assert!(array.iter().all(|v| *v == 0));
}

#[test]
fn workers_do_not_share_pooled_arrays() {
    let reg = Arc::new(registry());
    reg.freeze();

    let here = {
        let array = reg.temporary_block_array();
        array.as_ptr() as usize
    };
    let other = {
        let reg = Arc::clone(&reg);
        std::thread::spawn(move || {
            let array = reg.temporary_block_array();
            (array.as_ptr() as usize, array.iter().all(|v| *v == 0))
        })
        .join()
        .unwrap()
    };
    assert!(other.1);
    // Ours is still pooled on this thread.
    assert_eq!(reg.temporary_block_array().as_ptr() as usize, here);
}
