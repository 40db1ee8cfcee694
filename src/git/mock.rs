use crate::error::{Error, Result};
use crate::git::{CommitId, Vcs};
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Commit { message: String },
    Tag { name: String, target: CommitId },
}

#[derive(Debug, Default)]
struct MockState {
    calls: Vec<MockCall>,
    fail_commit: bool,
    fail_tag: bool,
}

/// Mock VCS for testing without a repository
///
/// Clones share their call log, so a test can hand one clone to the workflow and
/// inspect the other afterwards.
#[derive(Debug, Clone, Default)]
pub struct MockVcs {
    state: Rc<RefCell<MockState>>,
}

impl MockVcs {
    /// Create a new mock that accepts every call
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every commit fail
    pub fn failing_commit(self) -> Self {
        self.state.borrow_mut().fail_commit = true;
        self
    }

    /// Make every tag fail
    pub fn failing_tag(self) -> Self {
        self.state.borrow_mut().fail_tag = true;
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.state.borrow().calls.clone()
    }
}

impl Vcs for MockVcs {
    fn commit(&self, message: &str) -> Result<CommitId> {
        let mut state = self.state.borrow_mut();
        if state.fail_commit {
            return Err(Error::vcs("mock commit failure"));
        }
        state.calls.push(MockCall::Commit {
            message: message.to_string(),
        });
        Ok(CommitId::new(format!("{:040x}", state.calls.len())))
    }

    fn tag(&self, name: &str, target: &CommitId) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_tag {
            return Err(Error::vcs("mock tag failure"));
        }
        state.calls.push(MockCall::Tag {
            name: name.to_string(),
            target: target.clone(),
        });
        Ok(())
    }
}
