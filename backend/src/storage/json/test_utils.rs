/// Test utilities module for automatic cleanup and consistent test infrastructure
///
/// This module provides RAII-based cleanup that guarantees test data is removed
/// even if tests panic or fail.
use std::path::PathBuf;

use anyhow::Result;
use tempfile::TempDir;

use super::connection::JsonConnection;

/// RAII Test Environment that automatically cleans up on drop
///
/// This struct ensures that test data is always cleaned up, even if tests
/// panic. The cleanup happens automatically when the TestEnvironment goes
/// out of scope.
pub struct TestEnvironment {
    /// The temporary directory - kept alive to prevent auto-cleanup until drop
    _temp_dir: TempDir,
    /// The JSON connection for the test
    pub connection: JsonConnection,
    /// Base directory path for manual inspection if needed
    pub base_path: PathBuf,
}

impl TestEnvironment {
    /// Create a new test environment with automatic cleanup
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let base_path = temp_dir.path().to_path_buf();
        let connection = JsonConnection::new(&base_path)?;

        Ok(TestEnvironment {
            _temp_dir: temp_dir,
            connection,
            base_path,
        })
    }
}
