use auth_permissions::Permission;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Filesystem reach granted to a sandboxed plugin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileSystemAccess {
    #[default]
    None,
    Read,
    Write,
}

/// Resource limits a plugin asks the host to run it under
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SandboxDescriptor {
    #[serde(default)]
    pub allowed_apis: Vec<String>,

    /// Memory ceiling in MB
    #[validate(range(min = 1, max = 512, message = "maxMemory must be between 1 and 512 MB"))]
    pub max_memory: u32,

    /// Execution time ceiling in milliseconds
    #[validate(range(min = 1, max = 30000, message = "maxExecutionTime must be between 1 and 30000 ms"))]
    pub max_execution_time: u32,

    pub network_access: bool,

    pub file_system_access: FileSystemAccess,
}

/// Manifest shipped with every plugin package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
    #[validate(length(min = 1, message = "id must not be empty"))]
    pub id: String,

    #[validate(length(min = 1, max = 100, message = "name must be 1-100 characters"))]
    pub name: String,

    #[validate(custom(function = "validate_semver"))]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    #[validate(nested)]
    pub permissions: Vec<Permission>,

    #[validate(nested)]
    pub sandbox: SandboxDescriptor,
}

fn validate_semver(version: &str) -> Result<(), ValidationError> {
    if is_semver(version) {
        Ok(())
    } else {
        let mut error = ValidationError::new("semver");
        error.message = Some("version must be MAJOR.MINOR.PATCH".into());
        Err(error)
    }
}

/// `MAJOR.MINOR.PATCH` with an optional `-pre.release` and `+build` suffix.
#[must_use]
pub fn is_semver(version: &str) -> bool {
    let (rest, build) = match version.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (version, None),
    };
    let (core, pre) = match rest.split_once('-') {
        Some((core, pre)) => (core, Some(pre)),
        None => (rest, None),
    };

    let numbers: Vec<&str> = core.split('.').collect();
    if numbers.len() != 3 || !numbers.iter().all(|n| is_numeric_identifier(n)) {
        return false;
    }

    pre.map_or(true, |pre| identifiers_valid(pre, true)) && build.map_or(true, |build| identifiers_valid(build, false))
}

fn is_numeric_identifier(part: &str) -> bool {
    !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()) && (part == "0" || !part.starts_with('0'))
}

fn identifiers_valid(suffix: &str, no_leading_zeros: bool) -> bool {
    suffix.split('.').all(|id| {
        !id.is_empty()
            && id.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
            && (!no_leading_zeros || !id.bytes().all(|b| b.is_ascii_digit()) || is_numeric_identifier(id))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate;
    use auth_permissions::{Action, Scope};
    use serde_json::{json, Value};

    fn manifest() -> Value {
        json!({
            "id": "word-count",
            "name": "Word Count",
            "version": "1.4.0",
            "permissions": [
                { "resource": "docs", "action": "read", "scope": "own" }
            ],
            "sandbox": {
                "allowedApis": ["editor.getText"],
                "maxMemory": 64,
                "maxExecutionTime": 500,
                "networkAccess": false,
                "fileSystemAccess": "none"
            }
        })
    }

    #[test]
    fn test_valid_manifest() {
        let manifest: PluginManifest = validate(&manifest()).unwrap();
        assert_eq!(manifest.permissions, vec![Permission::scoped("docs", Action::Read, Scope::Own)]);
        assert_eq!(manifest.sandbox.file_system_access, FileSystemAccess::None);
        assert!(manifest.description.is_none());
    }

    #[test]
    fn test_semver_forms() {
        for ok in ["0.0.1", "1.2.3", "10.20.30", "1.0.0-alpha", "1.0.0-alpha.1", "1.0.0+build.5", "1.0.0-rc.1+sha.abc"] {
            assert!(is_semver(ok), "{ok} should be accepted");
        }
        for bad in ["", "1", "1.2", "1.2.3.4", "v1.2.3", "01.2.3", "1.2.x", "1.2.3-", "1.2.3-01", "1.2.3+"] {
            assert!(!is_semver(bad), "{bad} should be rejected");
        }
    }

    #[test]
    fn test_bad_version_reported() {
        let mut data = manifest();
        data["version"] = json!("latest");
        let failure = validate::<PluginManifest>(&data).unwrap_err();
        assert_eq!(failure.issues.len(), 1);
        assert_eq!(failure.issues[0].path, "version");
        assert_eq!(failure.issues[0].code, "semver");
    }

    #[test]
    fn test_sandbox_limits_enforced() {
        let mut data = manifest();
        data["sandbox"]["maxMemory"] = json!(1024);
        data["sandbox"]["maxExecutionTime"] = json!(0);
        let failure = validate::<PluginManifest>(&data).unwrap_err();
        let paths: Vec<&str> = failure.issues.iter().map(|i| i.path.as_str()).collect();
        assert_eq!(paths, vec!["sandbox.maxExecutionTime", "sandbox.maxMemory"]);
        assert!(failure.issues.iter().all(|issue| issue.code == "range"));

        data["sandbox"].as_object_mut().unwrap().remove("maxMemory");
        let failure = validate::<PluginManifest>(&data).unwrap_err();
        assert_eq!(failure.issues[0].path, "sandbox.maxMemory");
    }

    #[test]
    fn test_nested_permission_reported_with_index() {
        let mut data = manifest();
        data["permissions"] = json!([
            { "resource": "docs", "action": "read" },
            { "resource": "", "action": "read" }
        ]);
        let failure = validate::<PluginManifest>(&data).unwrap_err();
        assert_eq!(failure.issues[0].path, "permissions[1].resource");
    }
}
