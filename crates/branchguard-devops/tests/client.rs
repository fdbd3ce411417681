//! Client tests against a loopback stub of the Azure DevOps endpoints.

use branchguard_devops::{ClientConfig, DevOpsClient};
use branchguard_domain::PolicySource;
use branchguard_test_util::{StubRoute, StubServer};

fn client_for(server: &StubServer) -> DevOpsClient {
    DevOpsClient::new(
        ClientConfig {
            base_url: server.base_url(),
            organization: "acme".to_string(),
            api_version: "7.1-preview.1".to_string(),
            timeout: Some(std::time::Duration::from_secs(10)),
        },
        " secret\n",
    )
    .expect("build client")
}

#[test]
fn sends_basic_auth_with_empty_user_and_api_version() {
    let server = StubServer::start(vec![StubRoute::get("/acme/_apis/projects")
        .query("api-version", "7.1-preview.1")
        .respond(200, r#"{"count":1,"value":[{"name":"core","id":"p1"}]}"#)])
    .expect("start stub");

    let projects = client_for(&server).list_projects().expect("list projects");
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].name, "core");

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    // base64(":secret"); the token is trimmed before use.
    assert_eq!(
        requests[0].header("authorization"),
        Some("Basic OnNlY3JldA==")
    );
    assert_eq!(requests[0].header("content-type"), Some("application/json"));
}

#[test]
fn strips_bom_before_parsing() {
    let server = StubServer::start(vec![StubRoute::get("/acme/core/_apis/git/repositories")
        .respond_with_bom(r#"{"value":[{"name":"svc","id":"r1"}]}"#)])
    .expect("start stub");

    let repos = client_for(&server)
        .list_repositories("core")
        .expect("list repositories");
    assert_eq!(repos[0].name, "svc");
    assert_eq!(repos[0].id, "r1");
}

#[test]
fn branches_and_policies_use_expected_queries() {
    let server = StubServer::start(vec![
        StubRoute::get("/acme/Core Platform/_apis/git/repositories/r1/refs")
            .query("filter", "refs/heads/")
            .respond(
                200,
                r#"{"value":[{"name":"refs/heads/main","isLocked":true},{"name":"refs/heads/dev"}]}"#,
            ),
        StubRoute::get("/acme/Core Platform/_apis/policy/configurations")
            .query("repositoryId", "r1")
            .query("refName", "refs/heads/main")
            .respond(
                200,
                r#"{"value":[{"type":{"displayName":"Require reviewers"}},{"type":{"displayName":"Build"}}]}"#,
            ),
    ])
    .expect("start stub");
    let client = client_for(&server);

    let branches = client
        .list_branches("Core Platform", "r1")
        .expect("list branches");
    assert_eq!(branches.len(), 2);
    assert!(branches[0].is_locked);
    assert!(!branches[1].is_locked);

    let policies = client
        .list_policies("Core Platform", "r1", "refs/heads/main")
        .expect("list policies");
    let names: Vec<&str> = policies.iter().map(|p| p.display_name()).collect();
    assert_eq!(names, vec!["Require reviewers", "Build"]);
}

#[test]
fn missing_value_field_is_empty_collection() {
    let server = StubServer::start(vec![
        StubRoute::get("/acme/_apis/projects").respond(200, r#"{"count":0}"#),
    ])
    .expect("start stub");

    let projects = client_for(&server).list_projects().expect("list projects");
    assert!(projects.is_empty());
}

#[test]
fn non_success_status_is_an_error() {
    let server = StubServer::start(vec![StubRoute::get("/acme/core/_apis/policy/configurations")
        .respond(500, r#"{"message":"internal"}"#)])
    .expect("start stub");

    let err = client_for(&server)
        .list_policies("core", "r1", "refs/heads/main")
        .expect_err("500 should fail");
    assert_eq!(err.code(), "api_status");
    assert!(err.to_string().contains("HTTP 500"));
    assert!(err.to_string().contains("internal"));
    assert!(!err.to_string().contains("secret"));
}

#[test]
fn html_login_page_is_a_decode_error() {
    let server = StubServer::start(vec![StubRoute::get("/acme/_apis/projects")
        .respond(200, "<html><body>Sign in</body></html>")])
    .expect("start stub");

    let err = client_for(&server).list_projects().expect_err("html");
    assert_eq!(err.code(), "api_decode");
}

#[test]
fn refused_connection_is_a_transport_error() {
    let base_url = {
        let server = StubServer::start(Vec::new()).expect("start stub");
        server.base_url()
    };

    let client = DevOpsClient::new(
        ClientConfig {
            base_url,
            organization: "acme".to_string(),
            api_version: "7.1-preview.1".to_string(),
            timeout: Some(std::time::Duration::from_secs(5)),
        },
        "secret",
    )
    .expect("build client");

    let err = client.list_projects().expect_err("nothing listening");
    assert_eq!(err.code(), "api_transport");
}
