use serde::{Deserialize, Serialize};

/// Environment variable that carries the IAM role a workload federates into.
pub const AWS_ROLE_ARN: &str = "AWS_ROLE_ARN";

/// Builds the `namespace:name` key used for namespaced Kubernetes objects.
pub fn namespaced(namespace: &str, name: &str) -> String {
    format!("{}:{}", namespace, name)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvVar {
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl EnvVar {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Container {
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub env: Vec<EnvVar>,
}

impl Container {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_env(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push(EnvVar::new(name, value));
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pod {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub service_account_name: String,
    #[serde(default)]
    pub containers: Vec<Container>,
}

impl Pod {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            ..Default::default()
        }
    }

    pub fn with_service_account(mut self, name: impl Into<String>) -> Self {
        self.service_account_name = name.into();
        self
    }

    pub fn with_container(mut self, container: Container) -> Self {
        self.containers.push(container);
        self
    }

    pub fn key(&self) -> String {
        namespaced(&self.namespace, &self.name)
    }

    /// Key of the service account this pod declares, in its own namespace.
    pub fn service_account_key(&self) -> String {
        namespaced(&self.namespace, &self.service_account_name)
    }

    /// Role ARNs injected through `AWS_ROLE_ARN`, across all containers.
    pub fn federated_role_arns(&self) -> impl Iterator<Item = &str> {
        self.containers
            .iter()
            .flat_map(|c| c.env.iter())
            .filter(|e| e.name == AWS_ROLE_ARN)
            .map(|e| e.value.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecretRef {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAccount {
    pub name: String,
    pub namespace: String,
    #[serde(default)]
    pub secrets: Vec<SecretRef>,
}

impl ServiceAccount {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            secrets: Vec::new(),
        }
    }

    pub fn with_secret(mut self, name: impl Into<String>) -> Self {
        self.secrets.push(SecretRef { name: name.into() });
        self
    }

    pub fn key(&self) -> String {
        namespaced(&self.namespace, &self.name)
    }

    /// Key of the first listed secret. Later secrets are not considered.
    pub fn first_secret_key(&self) -> Option<String> {
        self.secrets
            .first()
            .map(|s| namespaced(&self.namespace, &s.name))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Secret {
    pub name: String,
    pub namespace: String,
    #[serde(default, rename = "type")]
    pub secret_type: String,
}

impl Secret {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            namespace: namespace.into(),
            secret_type: String::new(),
        }
    }

    pub fn key(&self) -> String {
        namespaced(&self.namespace, &self.name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub arn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assume_role_policy_document: Option<String>,
}

impl Role {
    pub fn new(arn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            name: name.into(),
            assume_role_policy_document: None,
        }
    }

    pub fn key(&self) -> String {
        self.arn.clone()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Policy {
    pub arn: String,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_version_id: Option<String>,
}

impl Policy {
    pub fn new(arn: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            arn: arn.into(),
            name: name.into(),
            default_version_id: None,
        }
    }

    pub fn key(&self) -> String {
        self.arn.clone()
    }
}
