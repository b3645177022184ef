//! Upload Options
//!
//! Configuration types for upload runs.

/// Container registry destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryTarget {
    /// Registry host, e.g. `swr.cn-north-4.myhuaweicloud.com`
    pub endpoint: String,
    /// Organization (namespace) images are pushed into
    pub org: String,
}

impl RegistryTarget {
    pub fn new(endpoint: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            org: org.into(),
        }
    }
}

/// Object storage destination for packages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageTarget {
    /// Bucket URL with optional prefix, e.g. `obs://bucket/prefix`
    pub bucket: String,
}

impl StorageTarget {
    pub fn new(bucket: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
        }
    }

    /// Object key for a local file name
    pub fn object_key(&self, file_name: &str) -> String {
        format!("{}/{}", self.bucket.trim_end_matches('/'), file_name)
    }
}

/// External programs the pipeline drives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOptions {
    /// Container runtime CLI (`docker`)
    pub runtime: String,
    /// Object storage CLI (`obsutil`)
    pub storage_cli: String,
}

impl Default for ToolOptions {
    fn default() -> Self {
        Self {
            runtime: "docker".to_string(),
            storage_cli: "obsutil".to_string(),
        }
    }
}

/// Options for the upload use case
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub registry: RegistryTarget,
    /// Packages are uploaded only when set
    pub storage: Option<StorageTarget>,
    /// Remove local images/files after a successful push
    pub cleanup_after_push: bool,
    /// Print commands instead of running them; never touch the ledger file
    pub dry_run: bool,
    pub tools: ToolOptions,
}

impl UploadOptions {
    pub fn new(registry: RegistryTarget) -> Self {
        Self {
            registry,
            storage: None,
            cleanup_after_push: false,
            dry_run: false,
            tools: ToolOptions::default(),
        }
    }

    pub fn with_storage(mut self, storage: Option<StorageTarget>) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_cleanup(mut self, cleanup: bool) -> Self {
        self.cleanup_after_push = cleanup;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_tools(mut self, tools: ToolOptions) -> Self {
        self.tools = tools;
        self
    }
}
