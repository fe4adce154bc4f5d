use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use navstack::{AnyMiddleware, Dispatcher, NavigationAction, NavigationState, NavigationStore};
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

// ============================================================================
// Helper Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
enum Page {
    Home,
    Account,
}

type Nav = NavigationState<Page>;
type Action = NavigationAction<Page>;

/// Blocks `Push(Account)` until a background sign-in finishes, then
/// redispatches it through the store's dispatcher.
fn deferred_auth_store(
    signed_in: Arc<AtomicBool>,
    checks: Rc<RefCell<Vec<JoinHandle<bool>>>>,
) -> NavigationStore<Page> {
    NavigationStore::default().with_middleware(AnyMiddleware::<Nav>::from_fn(
        "deferred-auth",
        move |action: Action, _state: &Nav, dispatcher: &Dispatcher<Action>| {
            if action != NavigationAction::Push(Page::Account) || signed_in.load(Ordering::SeqCst)
            {
                return Some(action);
            }
            let dispatcher = dispatcher.clone();
            let signed_in = Arc::clone(&signed_in);
            checks.borrow_mut().push(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(10)).await;
                signed_in.store(true, Ordering::SeqCst);
                dispatcher.send(action)
            }));
            None
        },
    ))
}

// ============================================================================
// Deferred Redispatch
// ============================================================================

#[tokio::test]
async fn test_guarded_push_lands_after_async_check() {
    let signed_in = Arc::new(AtomicBool::new(false));
    let checks = Rc::new(RefCell::new(Vec::new()));
    let store = deferred_auth_store(Arc::clone(&signed_in), Rc::clone(&checks));

    store.push(Page::Home);
    store.push(Page::Account);
    assert_eq!(store.path(), vec![Page::Home]);
    assert_eq!(store.process_pending(), 0);

    let handle = checks.borrow_mut().pop().unwrap();
    assert!(handle.await.unwrap());

    assert_eq!(store.process_pending(), 1);
    assert_eq!(store.path(), vec![Page::Home, Page::Account]);
    assert!(signed_in.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_pending_actions_run_on_next_dispatch() {
    let checks = Rc::new(RefCell::new(Vec::new()));
    let store = deferred_auth_store(Arc::new(AtomicBool::new(false)), Rc::clone(&checks));

    store.push(Page::Account);
    let handle = checks.borrow_mut().pop().unwrap();
    handle.await.unwrap();

    // The queued push runs right after this dispatch completes.
    store.push(Page::Home);
    assert_eq!(store.path(), vec![Page::Home, Page::Account]);
    assert_eq!(store.process_pending(), 0);
}

#[tokio::test]
async fn test_send_after_store_dropped_reports_failure() {
    let store = NavigationStore::<Page>::default();
    let dispatcher = store.dispatcher();
    drop(store);

    let delivered = tokio::spawn(async move { dispatcher.send(NavigationAction::Pop) })
        .await
        .unwrap();
    assert!(!delivered);
}

#[test]
fn test_worker_thread_redispatch() {
    let store = NavigationStore::<Page>::default();
    let dispatcher = store.dispatcher();

    std::thread::spawn(move || {
        dispatcher.send(NavigationAction::Push(Page::Home));
        dispatcher.send(NavigationAction::Push(Page::Account));
    })
    .join()
    .unwrap();

    assert!(store.path().is_empty());
    assert_eq!(store.process_pending(), 2);
    assert_eq!(store.path(), vec![Page::Home, Page::Account]);
}
