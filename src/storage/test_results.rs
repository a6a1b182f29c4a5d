//! Append-only store of self-test results (test_results.json)

use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::FinanceError;
use crate::models::{TestResult, UserId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TestResultData {
    results: Vec<TestResult>,
}

pub struct TestResultRepository {
    path: PathBuf,
    data: RwLock<Vec<TestResult>>,
}

impl TestResultRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
        }
    }

    pub fn load(&self) -> Result<(), FinanceError> {
        let file_data: TestResultData = read_json(&self.path)?;
        let mut data = self.data.write().map_err(lock_error)?;
        *data = file_data.results;
        Ok(())
    }

    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self.data.read().map_err(lock_error)?;
        let file_data = TestResultData {
            results: data.clone(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    pub fn append(&self, result: TestResult) -> Result<(), FinanceError> {
        let mut data = self.data.write().map_err(lock_error)?;
        data.push(result);
        Ok(())
    }

    /// A user's results, most recent first
    pub fn list_for_user(&self, user_id: UserId) -> Result<Vec<TestResult>, FinanceError> {
        let data = self.data.read().map_err(lock_error)?;

        let mut list: Vec<_> = data
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.recorded_at.cmp(&a.recorded_at));
        Ok(list)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TestStatus;
    use tempfile::TempDir;

    #[test]
    fn test_append_list_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test_results.json");
        let repo = TestResultRepository::new(path.clone());
        let user = UserId::new();

        repo.append(TestResult::new(user, "import parser", TestStatus::Passed))
            .unwrap();
        repo.append(TestResult::new(UserId::new(), "other", TestStatus::Failed))
            .unwrap();
        repo.save().unwrap();

        let reloaded = TestResultRepository::new(path);
        reloaded.load().unwrap();
        let mine = reloaded.list_for_user(user).unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].name, "import parser");
    }
}
