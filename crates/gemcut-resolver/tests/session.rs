use gemcut_core::gem::{GemEntry, GemTable};
use gemcut_resolver::bitmap::Bitmap;
use gemcut_resolver::session::{Session, SessionStatus};
use gemcut_resolver::set::ResolvedSet;
use gemcut_util::errors::GemcutError;

fn table() -> GemTable {
    GemTable::new(vec![
        GemEntry::new("mruby-print", vec![]),
        GemEntry::new("mruby-sprintf", vec![]),
        GemEntry::new("mruby-math", vec![0]),
        GemEntry::new("mruby-io", vec![]),
    ])
    .unwrap()
}

fn available(table: &GemTable, idx: &[usize]) -> Bitmap {
    let set: ResolvedSet = idx.iter().copied().collect();
    Bitmap::encode(&set, table.len())
}

#[test]
fn require_loads_dependencies_first() {
    let t = table();
    let mut s = Session::new(&t, available(&t, &[0, 1, 2]));
    assert!(s.require("mruby-math").unwrap());
    assert_eq!(s.init_order(), vec!["mruby-print", "mruby-math"]);
    assert_eq!(s.loaded_features().unwrap(), vec!["mruby-print", "mruby-math"]);
    assert_eq!(s.loaded_count().unwrap(), 2);
    assert!(s.is_loaded("mruby-print").unwrap());
}

#[test]
fn require_twice_returns_false() {
    let t = table();
    let mut s = Session::new(&t, available(&t, &[0, 1, 2]));
    assert!(s.require("mruby-print").unwrap());
    assert!(!s.require("mruby-print").unwrap());
    assert!(s.require("mruby-math").unwrap());
    assert_eq!(s.init_order(), vec!["mruby-print", "mruby-math"]);
}

#[test]
fn unavailable_or_unknown_gem_fails_to_load() {
    let t = table();
    let mut s = Session::new(&t, available(&t, &[0, 1, 2]));
    let err = s.require("mruby-io").unwrap_err();
    assert!(matches!(err, GemcutError::Load { ref name } if name == "mruby-io"));
    assert!(matches!(s.require("mruby-nope"), Err(GemcutError::Load { .. })));
    assert_eq!(s.loaded_count().unwrap(), 0);
}

#[test]
fn loadable_queries_follow_available_bitmap() {
    let t = table();
    let s = Session::new(&t, available(&t, &[1, 3]));
    assert_eq!(s.loadable_features().unwrap(), vec!["mruby-sprintf", "mruby-io"]);
    assert_eq!(s.loadable_count().unwrap(), 2);
    assert!(s.is_loadable("mruby-io").unwrap());
    assert!(!s.is_loadable("mruby-math").unwrap());
    assert!(!s.is_loadable("mruby-nope").unwrap());
}

#[test]
fn locked_session_refuses_require_but_answers_queries() {
    let t = table();
    let mut s = Session::new(&t, available(&t, &[0, 1, 2]));
    s.require("mruby-print").unwrap();
    s.lock();
    assert_eq!(s.status(), SessionStatus::Locked);
    assert!(matches!(s.require("mruby-math"), Err(GemcutError::Sealed)));
    assert_eq!(s.loaded_features().unwrap(), vec!["mruby-print"]);
}

#[test]
fn sealed_session_refuses_everything() {
    let t = table();
    let mut s = Session::new(&t, available(&t, &[0]));
    s.seal();
    s.lock();
    assert_eq!(s.status(), SessionStatus::Sealed);
    assert!(matches!(s.loaded_features(), Err(GemcutError::Sealed)));
    assert!(matches!(s.loadable_count(), Err(GemcutError::Sealed)));
    assert!(matches!(s.is_loaded("mruby-print"), Err(GemcutError::Sealed)));
}

#[test]
fn imitate_copies_loaded_gems() {
    let t = table();
    let mut src = Session::new(&t, available(&t, &[0, 1, 2]));
    src.require("mruby-sprintf").unwrap();
    src.require("mruby-math").unwrap();

    let mut dest = Session::new(&t, available(&t, &[0, 1, 2]));
    dest.imitate(&src).unwrap();
    assert_eq!(
        dest.loaded_features().unwrap(),
        vec!["mruby-print", "mruby-sprintf", "mruby-math"]
    );

    dest.lock();
    assert!(matches!(dest.imitate(&src), Err(GemcutError::Sealed)));
}

#[test]
fn cyclic_dependencies_load_once() {
    let t = GemTable::new(vec![GemEntry::new("a", vec![1]), GemEntry::new("b", vec![0])])
        .unwrap();
    let mut s = Session::new(&t, available(&t, &[0, 1]));
    assert!(s.require("a").unwrap());
    assert_eq!(s.init_order(), vec!["b", "a"]);
    assert!(!s.require("b").unwrap());
}

#[test]
fn selector_gem_is_loaded_from_the_start() {
    let t = GemTable::new(vec![
        GemEntry::new("mruby-print", vec![]),
        GemEntry::new("mruby-gemcut", vec![]),
    ])
    .unwrap();
    let mut s = Session::new(&t, available(&t, &[0, 1]));
    assert_eq!(s.loaded_features().unwrap(), vec!["mruby-gemcut"]);
    assert_eq!(s.loaded_count().unwrap(), 1);
    assert!(s.is_loaded("mruby-gemcut").unwrap());
    assert!(!s.require("mruby-gemcut").unwrap());

    s.require("mruby-print").unwrap();
    assert_eq!(s.init_order(), vec!["mruby-gemcut", "mruby-print"]);

    let mut dest = Session::new(&t, available(&t, &[0, 1]));
    dest.imitate(&s).unwrap();
    assert_eq!(dest.loaded_features().unwrap(), vec!["mruby-print", "mruby-gemcut"]);
}
