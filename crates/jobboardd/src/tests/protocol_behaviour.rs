//! Behavioural tests for the job board protocol over real sockets.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::net::SocketAddr;
use std::sync::Arc;
use std::thread;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use jobboard_protocol::codes::{
    ACCEPT_APPLICATION, APPLY_TO_JOB, POST_JOB, REJECT_APPLICATION, VIEW_APPLICATIONS, VIEW_JOBS,
};

use crate::bootstrap::{RunningServer, bootstrap_with};
use crate::store::SYNTHETIC_PREFIX;

use super::support::{RecordingHealthReporter, TestClient, TestConfigLoader};

struct BoardWorld {
    server: Option<RunningServer>,
    client: Option<TestClient>,
    second_client: Option<TestClient>,
    response: String,
}

impl BoardWorld {
    fn new() -> Self {
        Self {
            server: None,
            client: None,
            second_client: None,
            response: String::new(),
        }
    }

    fn addr(&self) -> SocketAddr {
        self.server
            .as_ref()
            .expect("server should be running")
            .local_addr()
    }

    fn start(&mut self) {
        let reporter = Arc::new(RecordingHealthReporter::default());
        let server =
            bootstrap_with(&TestConfigLoader::new(), reporter).expect("bootstrap should succeed");
        self.server = Some(server.start().expect("start server"));
    }

    fn client(&mut self) -> &mut TestClient {
        self.client.as_mut().expect("client should be connected")
    }

    fn request(&mut self, code: i32, payload: Option<&str>) {
        let response = self.client().request(code, payload);
        self.response = response;
    }
}

impl Drop for BoardWorld {
    fn drop(&mut self) {
        self.client = None;
        self.second_client = None;
        if let Some(server) = self.server.take() {
            let _ = server.stop();
        }
    }
}

#[fixture]
fn world() -> RefCell<BoardWorld> {
    RefCell::new(BoardWorld::new())
}

#[given("a running job board server")]
fn given_running_server(world: &RefCell<BoardWorld>) {
    world.borrow_mut().start();
}

#[given("a connected client")]
fn given_connected_client(world: &RefCell<BoardWorld>) {
    let addr = world.borrow().addr();
    world.borrow_mut().client = Some(TestClient::connect(addr));
}

#[given("a second connected client")]
fn given_second_client(world: &RefCell<BoardWorld>) {
    let addr = world.borrow().addr();
    world.borrow_mut().second_client = Some(TestClient::connect(addr));
}

#[when("the client posts the job \"{payload}\"")]
fn when_post_job(world: &RefCell<BoardWorld>, payload: String) {
    world.borrow_mut().request(POST_JOB, Some(&payload));
}

#[when("the client applies with \"{payload}\"")]
fn when_apply(world: &RefCell<BoardWorld>, payload: String) {
    world.borrow_mut().request(APPLY_TO_JOB, Some(&payload));
}

#[when("the client accepts application \"{application}\"")]
fn when_accept(world: &RefCell<BoardWorld>, application: String) {
    world
        .borrow_mut()
        .request(ACCEPT_APPLICATION, Some(&application));
}

#[when("the client rejects application \"{application}\"")]
fn when_reject(world: &RefCell<BoardWorld>, application: String) {
    world
        .borrow_mut()
        .request(REJECT_APPLICATION, Some(&application));
}

#[when("the client lists jobs")]
fn when_list_jobs(world: &RefCell<BoardWorld>) {
    world.borrow_mut().request(VIEW_JOBS, None);
}

#[when("the client lists all applications")]
fn when_list_applications(world: &RefCell<BoardWorld>) {
    world.borrow_mut().request(VIEW_APPLICATIONS, None);
}

#[when("the second client lists jobs")]
fn when_second_lists_jobs(world: &RefCell<BoardWorld>) {
    let mut world = world.borrow_mut();
    let response = world
        .second_client
        .as_mut()
        .expect("second client should be connected")
        .request(VIEW_JOBS, None);
    world.response = response;
}

#[when("the client sends the raw line \"{line}\"")]
fn when_raw_line(world: &RefCell<BoardWorld>, line: String) {
    let mut world = world.borrow_mut();
    let response = world.client().send_line(&line);
    world.response = response;
}

#[when("{count} clients post jobs concurrently")]
fn when_concurrent_posts(world: &RefCell<BoardWorld>, count: usize) {
    let addr = world.borrow().addr();
    let workers: Vec<_> = (0..count)
        .map(|index| {
            thread::spawn(move || {
                let mut client = TestClient::connect(addr);
                let payload = format!("Role {index}|Acme|Remote|Work|Rust|n/a");
                client.request(POST_JOB, Some(&payload))
            })
        })
        .collect();
    for worker in workers {
        let response = worker.join().expect("client thread");
        assert!(
            response.starts_with("Job posted successfully with ID: JOB"),
            "unexpected response: {response}"
        );
    }
}

#[then("the response is \"{expected}\"")]
fn then_response_is(world: &RefCell<BoardWorld>, expected: String) {
    assert_eq!(world.borrow().response, expected);
}

#[then("the response contains \"{snippet}\"")]
fn then_response_contains(world: &RefCell<BoardWorld>, snippet: String) {
    let world = world.borrow();
    assert!(
        world.response.contains(&snippet),
        "expected '{snippet}' in response:\n{}",
        world.response
    );
}

#[then("the response names a synthetic job seeker ID")]
fn then_synthetic_seeker(world: &RefCell<BoardWorld>) {
    let world = world.borrow();
    let seeker = world
        .response
        .lines()
        .find_map(|line| line.strip_prefix("Job Seeker ID: "))
        .expect("response should name the job seeker");
    assert!(seeker.starts_with(SYNTHETIC_PREFIX), "got {seeker}");
    assert_eq!(seeker.len(), SYNTHETIC_PREFIX.len() + 8);
}

#[then("the job listing contains {count} distinct jobs")]
fn then_distinct_jobs(world: &RefCell<BoardWorld>, count: usize) {
    let mut world = world.borrow_mut();
    world.request(VIEW_JOBS, None);
    let ids: BTreeSet<_> = world
        .response
        .lines()
        .filter_map(|line| line.strip_prefix("ID: "))
        .map(str::to_owned)
        .collect();
    assert_eq!(ids.len(), count);
}

#[scenario(
    path = "tests/features/job_board.feature",
    name = "Posted jobs are visible to job seekers"
)]
fn posted_jobs_are_listed(world: RefCell<BoardWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/job_board.feature",
    name = "Anonymous applicants receive a synthetic identity"
)]
fn anonymous_application_lifecycle(world: RefCell<BoardWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/job_board.feature",
    name = "Rejected applications show their status"
)]
fn rejected_application_status(world: RefCell<BoardWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/job_board.feature",
    name = "Malformed commands keep the connection open"
)]
fn malformed_command_recovery(world: RefCell<BoardWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/job_board.feature",
    name = "Applying to a missing job changes nothing"
)]
fn missing_job_application(world: RefCell<BoardWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/job_board.feature",
    name = "Unknown command codes are informational"
)]
fn unknown_command_code(world: RefCell<BoardWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/job_board.feature",
    name = "Clients share one board"
)]
fn clients_share_board(world: RefCell<BoardWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/job_board.feature",
    name = "Concurrent posts receive distinct identifiers"
)]
fn concurrent_posts(world: RefCell<BoardWorld>) {
    drop(world);
}
