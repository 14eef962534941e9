use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::common::{artifact_name, write_string_to_file};
use crate::errors::{StoreError, StoreResult};
use crate::model::{Pod, Policy, Role, Secret, ServiceAccount};
use crate::reference::{Kind, TypedRef};

/// The inventory of known Kubernetes and IAM entities, one collection per kind.
///
/// Keys are unique within a collection; nothing relates entries across
/// collections here. That is the correlator's job.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct AccessGraph {
    pub pods: IndexMap<String, Pod>,
    pub service_accounts: IndexMap<String, ServiceAccount>,
    pub secrets: IndexMap<String, Secret>,
    pub roles: IndexMap<String, Role>,
    pub policies: IndexMap<String, Policy>,
}

/// Borrowed view of one stored entity, serialized as the bare record.
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(untagged)]
pub enum EntityRecord<'a> {
    Pod(&'a Pod),
    ServiceAccount(&'a ServiceAccount),
    Secret(&'a Secret),
    Role(&'a Role),
    Policy(&'a Policy),
}

impl AccessGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_pod(&mut self, pod: Pod) {
        self.pods.insert(pod.key(), pod);
    }

    pub fn insert_service_account(&mut self, sa: ServiceAccount) {
        self.service_accounts.insert(sa.key(), sa);
    }

    pub fn insert_secret(&mut self, secret: Secret) {
        self.secrets.insert(secret.key(), secret);
    }

    pub fn insert_role(&mut self, role: Role) {
        self.roles.insert(role.key(), role);
    }

    pub fn insert_policy(&mut self, policy: Policy) {
        self.policies.insert(policy.key(), policy);
    }

    /// Looks up the record a typed reference points at.
    pub fn record(&self, reference: &TypedRef) -> Option<EntityRecord<'_>> {
        let key = reference.key.as_str();
        match reference.kind {
            Kind::Pod => self.pods.get(key).map(EntityRecord::Pod),
            Kind::ServiceAccount => self
                .service_accounts
                .get(key)
                .map(EntityRecord::ServiceAccount),
            Kind::Secret => self.secrets.get(key).map(EntityRecord::Secret),
            Kind::Role => self.roles.get(key).map(EntityRecord::Role),
            Kind::Policy => self.policies.get(key).map(EntityRecord::Policy),
        }
    }

    pub fn contains(&self, reference: &TypedRef) -> bool {
        self.record(reference).is_some()
    }

    pub fn count(&self, kind: Kind) -> usize {
        match kind {
            Kind::Pod => self.pods.len(),
            Kind::ServiceAccount => self.service_accounts.len(),
            Kind::Secret => self.secrets.len(),
            Kind::Role => self.roles.len(),
            Kind::Policy => self.policies.len(),
        }
    }

    pub fn stats(&self) -> String {
        format!(
            "Pods: {}, Service accounts: {}, Secrets: {}, Roles: {}, Policies: {}",
            self.pods.len(),
            self.service_accounts.len(),
            self.secrets.len(),
            self.roles.len(),
            self.policies.len()
        )
    }

    /// Serializes the whole store into a single JSON document.
    pub fn save(&self) -> StoreResult<String> {
        serde_json::to_string(self).map_err(StoreError::Serialization)
    }

    /// Rebuilds a store from a document produced by [`AccessGraph::save`].
    pub fn restore(artifact: &str) -> StoreResult<Self> {
        serde_json::from_str(artifact).map_err(|source| StoreError::MalformedArtifact { source })
    }

    /// Writes the store to `<dir>/<prefix>-<unix-timestamp>.json`.
    pub fn dump(&self, dir: &Path, prefix: &str) -> StoreResult<PathBuf> {
        let artifact = self.save()?;
        let path = dir.join(artifact_name(prefix, chrono::Utc::now().timestamp(), "json"));
        write_string_to_file(&path, &artifact).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;
        info!("Dumped access graph to {} ({})", path.display(), self.stats());
        Ok(path)
    }

    pub fn load(path: &Path) -> StoreResult<Self> {
        debug!("Loading access graph from {}", path.display());
        let artifact = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::restore(&artifact)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Container, AWS_ROLE_ARN};

    fn sample() -> AccessGraph {
        let mut ag = AccessGraph::new();
        ag.insert_pod(
            Pod::new("default", "web")
                .with_service_account("s3-echoer")
                .with_container(
                    Container::new("app").with_env(AWS_ROLE_ARN, "arn:aws:iam::1:role/r1"),
                ),
        );
        ag.insert_service_account(ServiceAccount::new("default", "s3-echoer").with_secret("tok"));
        ag.insert_secret(Secret::new("default", "tok"));
        ag.insert_role(Role::new("arn:aws:iam::1:role/r1", "r1"));
        ag.insert_policy(Policy::new("arn:aws:iam::aws:policy/S3", "S3"));
        ag
    }

    #[test]
    fn save_restore_round_trips() {
        let ag = sample();
        let restored = AccessGraph::restore(&ag.save().unwrap()).unwrap();
        assert_eq!(restored, ag);
    }

    #[test]
    fn empty_store_round_trips() {
        let ag = AccessGraph::new();
        assert_eq!(AccessGraph::restore(&ag.save().unwrap()).unwrap(), ag);
    }

    #[test]
    fn restore_rejects_wrong_shape() {
        assert!(AccessGraph::restore("not json").unwrap_err().is_malformed());
        assert!(AccessGraph::restore(r#"{"pods": []}"#)
            .unwrap_err()
            .is_malformed());
        assert!(AccessGraph::restore(r#"{"pods": {}}"#)
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn records_are_looked_up_by_kind() {
        let ag = sample();
        assert!(matches!(
            ag.record(&TypedRef::pod("default:web")),
            Some(EntityRecord::Pod(_))
        ));
        assert!(ag.contains(&TypedRef::secret("default:tok")));
        assert!(!ag.contains(&TypedRef::secret("default:web")));
        assert_eq!(ag.count(Kind::Role), 1);
    }

    #[test]
    fn dump_and_load_use_timestamped_names() {
        let dir = tempfile::tempdir().unwrap();
        let ag = sample();
        let path = ag.dump(dir.path(), "rbiam-dump").unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("rbiam-dump-"));
        assert!(name.ends_with(".json"));
        assert_eq!(AccessGraph::load(&path).unwrap(), ag);
    }
}
