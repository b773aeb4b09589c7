// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test doubles: a mock Kubernetes API, scripted and stateful command runners,
//! and in-memory secret stores.

use crate::constants::remote;
use crate::error::{Result, SyncError};
use crate::exec::{CommandOutput, CommandRunner};
use crate::kubernetes::ClusterSecretStore;
use crate::remote::RemoteSecretStore;
use crate::types::secret::{SecretDescriptor, SecretGroup};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

/// A mock HTTP service that returns predefined responses based on request paths.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<(String, String), (u16, String)>>>,
    requests: Arc<Mutex<Vec<(String, String)>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn on(self, method: &str, path: &str, status: u16, body: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), (status, body.to_string()));
        self
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, status, body)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, status, body)
    }

    /// Add a response for DELETE requests matching the exact path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, status, body)
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    /// HTTP methods of the requests received so far, in order
    pub fn methods(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(m, _)| m.clone())
            .collect()
    }

    fn find_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let responses = self.responses.lock().unwrap();

        if let Some(resp) = responses.get(&(method.to_string(), path.to_string())) {
            return Some(resp.clone());
        }

        // Prefix match for paths like /api/v1/namespaces/foo
        for ((m, p), resp) in responses.iter() {
            if m == method && path.starts_with(p) {
                return Some(resp.clone());
            }
        }

        None
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = std::result::Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<std::result::Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        self.requests
            .lock()
            .unwrap()
            .push((method.clone(), path.clone()));
        let response = self.find_response(&method, &path);

        Box::pin(async move {
            let (status, body) = response.unwrap_or_else(|| (404, not_found_json("path", &path)));
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Create a mock Secret JSON response; values are base64 encoded as the API does
pub fn secret_json(name: &str, namespace: &str, data: &[(&str, &str)]) -> String {
    let data: BTreeMap<&str, String> = data
        .iter()
        .map(|(k, v)| (*k, general_purpose::STANDARD.encode(v)))
        .collect();

    serde_json::json!({
        "apiVersion": "v1",
        "kind": "Secret",
        "metadata": {
            "name": name,
            "namespace": namespace,
            "uid": "test-uid"
        },
        "data": data,
        "type": "Opaque"
    })
    .to_string()
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

type Calls = Arc<Mutex<Vec<(String, Vec<String>)>>>;

/// Replays queued outputs in order and records every invocation
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    outputs: Arc<Mutex<VecDeque<Result<CommandOutput>>>>,
    calls: Calls,
}

impl ScriptedRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, output: CommandOutput) -> Self {
        self.outputs.lock().unwrap().push_back(Ok(output));
        self
    }

    /// Queue a runner error, such as undecodable output
    pub fn fail(self, error: SyncError) -> Self {
        self.outputs.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));
        self.outputs
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CommandOutput::failed(127, "no scripted response")))
    }
}

#[derive(Default)]
struct KubectlState {
    /// (namespace, name) -> key -> base64 value
    secrets: BTreeMap<(String, String), BTreeMap<String, String>>,
    /// (verb, secret name) pairs that fail
    failures: HashSet<(String, String)>,
}

/// Emulates `kubectl get|delete|create secret` against an in-memory cluster
#[derive(Clone, Default)]
pub struct FakeKubectl {
    state: Arc<Mutex<KubectlState>>,
    calls: Calls,
}

impl FakeKubectl {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `kubectl <verb> secret <name>` exit with an error
    pub fn fail_on(self, verb: &str, name: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failures
            .insert((verb.to_string(), name.to_string()));
        self
    }

    pub fn insert(&self, namespace: &str, name: &str, data: &SecretGroup) {
        self.state.lock().unwrap().secrets.insert(
            (namespace.to_string(), name.to_string()),
            data.iter()
                .map(|(k, v)| (k.clone(), general_purpose::STANDARD.encode(v)))
                .collect(),
        );
    }

    pub fn secret_count(&self) -> usize {
        self.state.lock().unwrap().secrets.len()
    }

    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }

    /// First argument of every invocation
    pub fn verbs(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|(_, args)| args.first().cloned())
            .collect()
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

#[async_trait]
impl CommandRunner for FakeKubectl {
    async fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        let verb = args.first().map(String::as_str).unwrap_or_default();
        let name_index = if verb == "create" { 3 } else { 2 };
        let name = args.get(name_index).cloned().unwrap_or_default();
        let namespace = flag_value(args, "-n").unwrap_or("default").to_string();
        let key = (namespace.clone(), name.clone());

        let mut state = self.state.lock().unwrap();
        if state.failures.contains(&(verb.to_string(), name.clone())) {
            return Ok(CommandOutput::failed(
                1,
                format!("Error from server (Forbidden): cannot {} secret {}", verb, name),
            ));
        }

        let not_found = || {
            CommandOutput::failed(
                1,
                format!("Error from server (NotFound): secrets \"{}\" not found", name),
            )
        };

        let output = match verb {
            "get" => match state.secrets.get(&key) {
                None => not_found(),
                Some(data) if flag_value(args, "-o") == Some("json") => {
                    CommandOutput::succeeded(
                        serde_json::json!({
                            "apiVersion": "v1",
                            "kind": "Secret",
                            "metadata": {"name": name, "namespace": namespace},
                            "data": data,
                            "type": "Opaque"
                        })
                        .to_string(),
                    )
                }
                Some(data) => CommandOutput::succeeded(format!(
                    "NAME   TYPE     DATA   AGE\n{}   Opaque   {}      1s\n",
                    name,
                    data.len()
                )),
            },
            "delete" => match state.secrets.remove(&key) {
                Some(_) => CommandOutput::succeeded(format!("secret \"{}\" deleted\n", name)),
                None => not_found(),
            },
            "create" if state.secrets.contains_key(&key) => CommandOutput::failed(
                1,
                format!(
                    "error: failed to create secret secrets \"{}\" already exists",
                    name
                ),
            ),
            "create" => {
                let mut data = BTreeMap::new();
                let mut iter = args.iter();
                while let Some(arg) = iter.next() {
                    if arg == "--from-literal" {
                        if let Some((k, v)) = iter.next().and_then(|l| l.split_once('=')) {
                            data.insert(k.to_string(), general_purpose::STANDARD.encode(v));
                        }
                    }
                }
                state.secrets.insert(key, data);
                CommandOutput::succeeded(format!("secret/{} created\n", name))
            }
            _ => CommandOutput::failed(1, format!("error: unknown command \"{}\"", verb)),
        };

        Ok(output)
    }
}

#[derive(Default)]
struct RemoteState {
    secrets: BTreeMap<String, String>,
    failing: HashSet<String>,
    calls: Vec<String>,
}

/// In-memory Secret Manager
#[derive(Clone, Default)]
pub struct FakeRemoteStore {
    state: Arc<Mutex<RemoteState>>,
}

impl FakeRemoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every secret the default plan requires, with non-empty values
    pub fn with_all_required() -> Self {
        Self::new()
            .with_secret(remote::POSTGRES_PASSWORD, "hunter2")
            .with_secret(remote::POSTGRES_USER, "app")
            .with_secret(remote::POSTGRES_HOST, "10.0.0.5")
            .with_secret(remote::POSTGRES_PORT, "5432")
            .with_secret(remote::POSTGRES_DATABASE, "complex")
            .with_secret(remote::REDIS_HOST, "10.0.0.3")
            .with_secret(remote::REDIS_PORT, "6379")
    }

    pub fn with_secret(self, name: &str, value: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .secrets
            .insert(name.to_string(), value.to_string());
        self
    }

    pub fn without(self, name: &str) -> Self {
        self.state.lock().unwrap().secrets.remove(name);
        self
    }

    /// Make reads of `name` fail as if access was denied
    pub fn failing(self, name: &str) -> Self {
        self.state.lock().unwrap().failing.insert(name.to_string());
        self
    }

    /// Names passed to `get`, in order
    pub fn calls(&self) -> Vec<String> {
        self.state.lock().unwrap().calls.clone()
    }
}

#[async_trait]
impl RemoteSecretStore for FakeRemoteStore {
    async fn get(&self, name: &str) -> Result<String> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(name.to_string());

        if state.failing.contains(name) {
            return Err(SyncError::NotFoundOrAccess {
                name: name.to_string(),
                reason: "PERMISSION_DENIED".to_string(),
            });
        }

        state
            .secrets
            .get(name)
            .cloned()
            .ok_or_else(|| SyncError::NotFoundOrAccess {
                name: name.to_string(),
                reason: "NOT_FOUND".to_string(),
            })
    }

    async fn list(&self) -> Result<Vec<SecretDescriptor>> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .secrets
            .keys()
            .map(|name| SecretDescriptor {
                name: format!("projects/test-project/secrets/{}", name),
                create_time: None,
                labels: None,
            })
            .collect())
    }
}

#[derive(Default)]
struct ClusterState {
    secrets: BTreeMap<(String, String), SecretGroup>,
    failing: HashSet<String>,
    creates: Vec<(String, String, SecretGroup)>,
    gets: usize,
}

/// In-memory cluster secret store recording every write attempt
#[derive(Clone, Default)]
pub struct FakeClusterStore {
    state: Arc<Mutex<ClusterState>>,
}

impl FakeClusterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `create` of `name` report failure
    pub fn failing_create(self, name: &str) -> Self {
        self.state.lock().unwrap().failing.insert(name.to_string());
        self
    }

    pub fn insert(&self, namespace: &str, name: &str, data: SecretGroup) {
        self.state
            .lock()
            .unwrap()
            .secrets
            .insert((namespace.to_string(), name.to_string()), data);
    }

    pub fn secret(&self, namespace: &str, name: &str) -> Option<SecretGroup> {
        self.state
            .lock()
            .unwrap()
            .secrets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
    }

    /// Every `create` call as (name, namespace, data), failed ones included
    pub fn created(&self) -> Vec<(String, String, SecretGroup)> {
        self.state.lock().unwrap().creates.clone()
    }

    pub fn created_names(&self) -> Vec<String> {
        self.created().into_iter().map(|(name, _, _)| name).collect()
    }

    pub fn get_calls(&self) -> usize {
        self.state.lock().unwrap().gets
    }
}

#[async_trait]
impl ClusterSecretStore for FakeClusterStore {
    async fn exists(&self, name: &str, namespace: &str) -> bool {
        self.secret(namespace, name).is_some()
    }

    async fn create(&self, name: &str, namespace: &str, data: &SecretGroup) -> bool {
        let mut state = self.state.lock().unwrap();
        state
            .creates
            .push((name.to_string(), namespace.to_string(), data.clone()));

        if state.failing.contains(name) {
            return false;
        }

        state
            .secrets
            .insert((namespace.to_string(), name.to_string()), data.clone());
        true
    }

    async fn get(&self, name: &str, namespace: &str) -> SecretGroup {
        let mut state = self.state.lock().unwrap();
        state.gets += 1;
        state
            .secrets
            .get(&(namespace.to_string(), name.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}
