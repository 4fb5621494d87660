//! Read View State
//!
//! Scoped query state shared by the list views: fetch policies, a request
//! generation that discards stale responses, and the loading / error / empty
//! phases a list renders.

use std::fmt::Debug;
use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchPolicy {
    /// Discard held data and wait for the network on every fetch
    NetworkOnly,
    /// Keep showing held data of the same scope while revalidating
    CacheAndNetwork,
}

/// Identifies one in-flight request. Only the latest ticket may resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ticket<K> {
    generation: u64,
    scope: K,
}

impl<K> Ticket<K> {
    pub fn scope(&self) -> &K {
        &self.scope
    }
}

#[derive(Debug, Clone)]
pub struct QueryState<K, T> {
    policy: FetchPolicy,
    generation: u64,
    /// Scope of the most recent request; `data` always belongs to it
    scope: Option<K>,
    data: Option<T>,
    loading: bool,
    error: Option<ApiError>,
}

/// A read view's fetch failure, as shown by its failure boundary
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Error loading {what}: {source}")]
pub struct LoadError {
    pub what: &'static str,
    #[source]
    pub source: ApiError,
}

/// What a list view renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListPhase {
    Loading,
    Failed(ApiError),
    Empty,
    Ready,
}

impl<K: Clone + PartialEq, T> QueryState<K, T> {
    pub fn new(policy: FetchPolicy) -> Self {
        Self {
            policy,
            generation: 0,
            scope: None,
            data: None,
            loading: false,
            error: None,
        }
    }

    /// Start a request for `scope`. Any earlier ticket becomes stale.
    pub fn begin(&mut self, scope: K) -> Ticket<K> {
        self.generation += 1;
        let same_scope = self.scope.as_ref() == Some(&scope);
        if self.policy == FetchPolicy::NetworkOnly || !same_scope {
            self.data = None;
        }
        self.scope = Some(scope.clone());
        self.loading = true;
        self.error = None;
        Ticket {
            generation: self.generation,
            scope,
        }
    }

    /// Nothing selected: drop everything and ignore pending responses.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.scope = None;
        self.data = None;
        self.loading = false;
        self.error = None;
    }

    /// One refetch step: `None` clears and sends nothing, `Some` begins a
    /// request for that scope.
    pub fn start(&mut self, scope: Option<K>) -> Option<Ticket<K>> {
        match scope {
            Some(scope) => Some(self.begin(scope)),
            None => {
                self.clear();
                None
            }
        }
    }

    /// Apply a response. Returns `false` if the ticket is stale and the
    /// response was discarded.
    pub fn resolve(&mut self, ticket: Ticket<K>, outcome: Result<T, ApiError>) -> bool {
        if ticket.generation != self.generation || self.scope.as_ref() != Some(&ticket.scope) {
            return false;
        }
        self.loading = false;
        match outcome {
            Ok(data) => {
                self.data = Some(data);
                self.error = None;
            }
            // Held data stays visible; only the policy decides what is discarded
            Err(e) => self.error = Some(e),
        }
        true
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn scope(&self) -> Option<&K> {
        self.scope.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&ApiError> {
        self.error.as_ref()
    }
}

impl<K, X> QueryState<K, Vec<X>> {
    pub fn phase(&self) -> ListPhase {
        match (&self.data, &self.error) {
            (Some(items), _) if items.is_empty() => ListPhase::Empty,
            (Some(_), _) => ListPhase::Ready,
            (None, Some(e)) => ListPhase::Failed(e.clone()),
            (None, None) => ListPhase::Loading,
        }
    }

    /// Stale items are on screen while a newer request is in flight.
    pub fn is_refreshing(&self) -> bool {
        self.loading && self.data.is_some()
    }

    /// Error to show next to held items (a failure with nothing held renders as `Failed`).
    pub fn stale_error(&self) -> Option<&ApiError> {
        self.data.as_ref().and(self.error.as_ref())
    }

    pub fn items(&self) -> &[X] {
        self.data.as_deref().unwrap_or_default()
    }
}

/// Hold a scope back until the session is ready to send requests.
pub fn gate_scope<K>(ready: bool, scope: Option<K>) -> Option<K> {
    scope.filter(|_| ready)
}

/// Refresh signal that changes whenever either counter does. Both only grow.
pub fn combined_refresh(shared: u32, local: u32) -> u32 {
    shared.wrapping_add(local)
}

/// Fetch into a `QueryState` on mount, whenever `scope` changes and whenever
/// `refresh` changes, without remounting the view.
///
/// A `None` scope clears the state and sends nothing.
pub fn use_query<K, T, F, Fut>(
    policy: FetchPolicy,
    scope: Signal<Option<K>>,
    refresh: Signal<u32>,
    fetch: F,
) -> RwSignal<QueryState<K, T>>
where
    K: Clone + PartialEq + Debug + Send + Sync + 'static,
    T: Send + Sync + 'static,
    F: Fn(K) -> Fut + 'static,
    Fut: Future<Output = Result<T, ApiError>> + 'static,
{
    let state = RwSignal::new(QueryState::new(policy));

    Effect::new(move |_| {
        refresh.track();
        let key = scope.get();
        let Some(ticket) = state.try_update(|s| s.start(key)).flatten() else {
            return;
        };
        log::debug!("fetching scope {:?}", ticket.scope);
        let request = fetch(ticket.scope.clone());
        spawn_local(async move {
            let outcome = request.await;
            if state.try_update(|s| s.resolve(ticket, outcome)) != Some(true) {
                log::debug!("discarded stale response");
            }
        });
    });

    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    type Projects = QueryState<String, Vec<&'static str>>;

    #[test]
    fn test_initial_phase_is_loading() {
        let state = Projects::new(FetchPolicy::CacheAndNetwork);
        assert_eq!(state.phase(), ListPhase::Loading);
        assert!(!state.is_refreshing());
    }

    #[test]
    fn test_success_and_empty() {
        let mut state = Projects::new(FetchPolicy::CacheAndNetwork);
        let ticket = state.begin("acme".into());
        assert!(state.resolve(ticket, Ok::<_, ApiError>(vec![])));
        assert_eq!(state.phase(), ListPhase::Empty);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_cache_and_network_serves_stale_while_revalidating() {
        let mut state = Projects::new(FetchPolicy::CacheAndNetwork);
        let t1 = state.begin("acme".into());
        state.resolve(t1, Ok::<_, ApiError>(vec!["Launch"]));

        let _t2 = state.begin("acme".into());
        assert_eq!(state.phase(), ListPhase::Ready);
        assert!(state.is_refreshing());
        assert_eq!(state.items(), &["Launch"]);
    }

    #[test]
    fn test_network_only_discards_on_refetch() {
        let mut state = QueryState::<(), Vec<u32>>::new(FetchPolicy::NetworkOnly);
        let t1 = state.begin(());
        state.resolve(t1, Ok::<_, ApiError>(vec![1, 2]));

        let _t2 = state.begin(());
        assert_eq!(state.phase(), ListPhase::Loading);
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_scope_change_never_shows_other_scope_items() {
        let mut state = Projects::new(FetchPolicy::CacheAndNetwork);
        let t1 = state.begin("acme".into());
        state.resolve(t1, Ok::<_, ApiError>(vec!["Launch"]));

        state.begin("globex".into());
        assert_eq!(state.phase(), ListPhase::Loading);
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_stale_scope_response_is_discarded() {
        let mut state = Projects::new(FetchPolicy::CacheAndNetwork);
        let acme = state.begin("acme".into());
        let globex = state.begin("globex".into());

        // acme answers late, after the user moved on
        assert!(state.resolve(globex, Ok::<_, ApiError>(vec!["Merger"])));
        assert!(!state.resolve(acme, Ok::<_, ApiError>(vec!["Launch"])));
        assert_eq!(state.items(), &["Merger"]);
        assert_eq!(state.scope().map(String::as_str), Some("globex"));
    }

    #[test]
    fn test_out_of_order_same_scope_keeps_latest() {
        let mut state = Projects::new(FetchPolicy::CacheAndNetwork);
        let old = state.begin("acme".into());
        let new = state.begin("acme".into());
        assert!(state.resolve(new, Ok::<_, ApiError>(vec!["Launch", "Beta"])));
        assert!(!state.resolve(old, Ok::<_, ApiError>(vec!["Launch"])));
        assert_eq!(state.items().len(), 2);
    }

    #[test]
    fn test_failure_keeps_previous_data() {
        let mut state = Projects::new(FetchPolicy::CacheAndNetwork);
        let t1 = state.begin("acme".into());
        state.resolve(t1, Ok::<_, ApiError>(vec!["Launch"]));

        let t2 = state.begin("acme".into());
        state.resolve(t2, Err::<Vec<&str>, _>(ApiError::Http { status: 502 }));
        assert_eq!(state.phase(), ListPhase::Ready);
        assert_eq!(state.items(), &["Launch"]);
        assert_eq!(state.stale_error(), Some(&ApiError::Http { status: 502 }));
    }

    #[test]
    fn test_failure_without_data() {
        let mut state = Projects::new(FetchPolicy::CacheAndNetwork);
        let t1 = state.begin("acme".into());
        state.resolve(t1, Err::<Vec<&str>, _>(ApiError::Transport("offline".into())));
        assert_eq!(state.phase(), ListPhase::Failed(ApiError::Transport("offline".into())));
        assert_eq!(state.stale_error(), None);
    }

    #[test]
    fn test_start_without_scope_sends_nothing() {
        let mut state = Projects::new(FetchPolicy::CacheAndNetwork);
        let t1 = state.start(Some("acme".into())).unwrap();
        state.resolve(t1, Ok::<_, ApiError>(vec!["Launch"]));

        assert_eq!(state.start(None), None);
        assert_eq!(state.scope(), None);
        assert!(state.items().is_empty());
    }

    #[test]
    fn test_no_request_before_session_is_ready() {
        let mut state = QueryState::<(), Vec<u32>>::new(FetchPolicy::NetworkOnly);
        assert_eq!(state.start(gate_scope(false, Some(()))), None);
        assert_eq!(state.phase(), ListPhase::Loading);

        let ticket = state.start(gate_scope(true, Some(()))).unwrap();
        assert!(state.resolve(ticket, Ok::<_, ApiError>(vec![1])));
        assert_eq!(state.items(), &[1]);
    }

    #[test]
    fn test_combined_refresh_moves_with_either_counter() {
        let base = combined_refresh(3, 0);
        assert_ne!(combined_refresh(4, 0), base);
        assert_ne!(combined_refresh(3, 1), base);
        assert_eq!(combined_refresh(u32::MAX, 1), 0);
    }

    #[test]
    fn test_clear_discards_pending() {
        let mut state = Projects::new(FetchPolicy::CacheAndNetwork);
        let t1 = state.begin("acme".into());
        state.clear();
        assert!(!state.resolve(t1, Ok::<_, ApiError>(vec!["Launch"])));
        assert_eq!(state.scope(), None);
        assert!(state.items().is_empty());
    }
}
