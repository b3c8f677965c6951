//! Expansions happen inside the run's `search` span whether the run is
//! stepped or driven to the end.

use std::cell::RefCell;

use waypoint_search::contract::{SearchDomain, Successor};
use waypoint_search::heuristic::ZeroHeuristic;
use waypoint_search::policy::SearchPolicy;
use waypoint_search::search::{search, SearchRun};

/// Endless `+1` line that records the name of the span active at each
/// successor request.
#[derive(Default)]
struct SpanRecordingLine {
    spans: RefCell<Vec<Option<&'static str>>>,
}

impl SearchDomain for SpanRecordingLine {
    type State = u64;
    type Action = ();

    fn domain_id(&self) -> &str {
        "span_recording_line"
    }

    fn successors(&self, state: &u64) -> Vec<Successor<u64, ()>> {
        let name = tracing::Span::current().metadata().map(|m| m.name());
        self.spans.borrow_mut().push(name);
        vec![Successor::unit(state + 1, ())]
    }

    fn is_goal(&self, _state: &u64) -> bool {
        false
    }
}

#[test]
fn stepped_expansions_run_inside_search_span() {
    let domain = SpanRecordingLine::default();
    let policy = SearchPolicy::unbounded();
    tracing::subscriber::with_default(tracing_subscriber::registry(), || {
        let mut run = SearchRun::new(&domain, 0, &ZeroHeuristic, &policy).unwrap();
        for _ in 0..3 {
            assert!(!run.step().is_terminal());
        }
    });
    assert_eq!(*domain.spans.borrow(), vec![Some("search"); 3]);
}

#[test]
fn span_is_not_left_entered_between_steps() {
    let domain = SpanRecordingLine::default();
    let policy = SearchPolicy::unbounded();
    tracing::subscriber::with_default(tracing_subscriber::registry(), || {
        let mut run = SearchRun::new(&domain, 0, &ZeroHeuristic, &policy).unwrap();
        let _ = run.step();
        assert!(tracing::Span::current().is_none());
    });
}

#[test]
fn driven_runs_expand_inside_search_span() {
    let domain = SpanRecordingLine::default();
    let policy = SearchPolicy::unbounded().with_max_expansions(4);
    tracing::subscriber::with_default(tracing_subscriber::registry(), || {
        let result = search(&domain, 0, &ZeroHeuristic, &policy).unwrap();
        assert_eq!(result.stats.expansions, 4);
    });
    assert_eq!(*domain.spans.borrow(), vec![Some("search"); 4]);
}
