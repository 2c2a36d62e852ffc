// tests/common/mod.rs
//
// A stub GitHub API on a local port. The blocking client under test must not
// run inside an async context, so the runtime is only entered to drive the
// stub server itself.
#![allow(dead_code)]

use git_tag_action::config::ApiSettings;
use git_tag_action::github::GitHubClient;
use serde_json::json;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

pub struct StubApi {
    server: MockServer,
    runtime: Runtime,
}

impl StubApi {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());
        StubApi { server, runtime }
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn client(&self) -> GitHubClient {
        let settings = ApiSettings {
            base_url: self.uri(),
            ..ApiSettings::default()
        };
        GitHubClient::new("secret", &settings).unwrap()
    }

    pub fn requests(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    /// `METHOD /path` of every request received, in order
    pub fn request_lines(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|r| format!("{} {}", r.method, r.url.path()))
            .collect()
    }
}

pub fn git_ref_body(name: &str, sha: &str) -> serde_json::Value {
    json!({
        "ref": format!("refs/tags/{}", name),
        "node_id": "REF_kwDOAAAB",
        "url": "https://api.github.com/repos/octocat/hello-world/git/refs/tags/x",
        "object": { "sha": sha, "type": "commit", "url": "https://api.github.com/x" }
    })
}
