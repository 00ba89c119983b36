use super::*;

#[test]
fn starts_hidden() {
    let loading = LoadingIndicator::new();
    assert!(!loading.is_visible());
    assert_eq!(loading.show_count(), 0);
}

#[test]
fn guard_shows_then_hides_on_drop() {
    let loading = LoadingIndicator::new();
    {
        let _guard = loading.begin();
        assert!(loading.is_visible());
    }
    assert!(!loading.is_visible());
    assert_eq!(loading.show_count(), 1);
}

#[test]
fn hide_is_idempotent() {
    let loading = LoadingIndicator::new();
    loading.hide();
    loading.hide();
    assert!(!loading.is_visible());
    assert_eq!(loading.show_count(), 0);
}

#[test]
fn guard_hides_on_early_return() {
    fn run(loading: &LoadingIndicator) -> Result<(), &'static str> {
        let _guard = loading.begin();
        Err::<(), _>("boom")?;
        Ok(())
    }

    let loading = LoadingIndicator::new();
    assert!(run(&loading).is_err());
    assert!(!loading.is_visible());
}

#[test]
fn guard_hides_on_panic() {
    let loading = LoadingIndicator::new();
    let inner = loading.clone();
    let result = std::panic::catch_unwind(move || {
        let _guard = inner.begin();
        panic!("render blew up");
    });
    assert!(result.is_err());
    assert!(!loading.is_visible());
}
