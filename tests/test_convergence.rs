use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use arscheduler::convergence::{ConvergencePoller, NodeStateFetcher};
use arscheduler::error::{Error, Result};

/// Plays back a scripted sequence of controller state responses.
enum Response {
    Nodes(Vec<String>),
    Malformed,
}

struct ScriptedFetcher {
    responses: Mutex<VecDeque<Response>>,
    polls: AtomicU32,
}

impl ScriptedFetcher {
    fn new(responses: Vec<Response>) -> Self {
        ScriptedFetcher { responses: Mutex::new(responses.into()), polls: AtomicU32::new(0) }
    }

    fn polls(&self) -> u32 {
        self.polls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NodeStateFetcher for ScriptedFetcher {
    async fn fetch_nodes(&self) -> Result<Vec<String>> {
        self.polls.fetch_add(1, Ordering::SeqCst);
        match self.responses.lock().unwrap().pop_front() {
            Some(Response::Nodes(nodes)) => Ok(nodes),
            Some(Response::Malformed) | None => Err(Error::ControllerUnreachable),
        }
    }
}

fn nodes(count: usize) -> Response {
    Response::Nodes((0..count).map(|i| format!("node-{}", i)).collect())
}

fn fast_poller(expected: usize) -> ConvergencePoller {
    ConvergencePoller::new(expected, Duration::from_millis(1))
}

#[tokio::test]
async fn converges_after_exactly_two_polls_when_the_second_snapshot_matches() {
    let fetcher = ScriptedFetcher::new(vec![nodes(3), nodes(5)]);
    let poller = fast_poller(5);

    let polls = poller.await_convergence(&fetcher).await.expect("must converge");

    assert_eq!(polls, 2, "the second snapshot matched the expected count");
    assert_eq!(fetcher.polls(), 2, "no polls beyond convergence");
}

#[tokio::test]
async fn converges_immediately_when_the_first_snapshot_matches() {
    let fetcher = ScriptedFetcher::new(vec![nodes(5)]);

    let polls = fast_poller(5).await_convergence(&fetcher).await.expect("must converge");
    assert_eq!(polls, 1);
}

#[tokio::test]
async fn a_malformed_state_response_aborts_immediately() {
    // Unlike a not-yet-converged snapshot, a decode failure is terminal.
    let fetcher = ScriptedFetcher::new(vec![nodes(3), Response::Malformed, nodes(5)]);

    let err = fast_poller(5).await_convergence(&fetcher).await.expect_err("must abort");
    assert!(matches!(err, Error::ControllerUnreachable));
    assert_eq!(fetcher.polls(), 2, "no retry after the malformed response");
}

#[tokio::test]
async fn the_poll_budget_is_bounded_and_ends_in_topology_mismatch() {
    let fetcher = ScriptedFetcher::new(vec![nodes(3), nodes(3), nodes(4)]);
    let poller = fast_poller(5).with_max_attempts(3);

    let err = poller.await_convergence(&fetcher).await.expect_err("budget exhausted");

    match err {
        Error::TopologyMismatch { expected, last_seen, attempts } => {
            assert_eq!(expected, 5);
            assert_eq!(last_seen, 4, "the mismatch reports the last observed count");
            assert_eq!(attempts, 3);
        }
        other => panic!("expected TopologyMismatch, got {:?}", other),
    }
    assert_eq!(fetcher.polls(), 3);
}

#[tokio::test]
async fn an_overshooting_node_count_does_not_converge() {
    // Convergence is equality, not "at least".
    let fetcher = ScriptedFetcher::new(vec![nodes(6), nodes(5)]);

    let polls = fast_poller(5).await_convergence(&fetcher).await.expect("must converge on equality");
    assert_eq!(polls, 2);
}
