//! Budget goal persistence with a device-local fallback
//!
//! When the backend refuses a preference write, the goal is kept on this
//! device instead and the user is told it will not follow them elsewhere.

use super::backend::DocumentBackend;
use crate::error::{FinanceError, FinanceResult};
use crate::models::BudgetGoal;
use crate::notify::Notifier;
use crate::services::session::UserId;

/// Where a saved goal ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreferenceSave {
    Remote,
    LocalOnly,
}

/// Save remotely, falling back to the local copy on `PermissionDenied`
///
/// Other failures are returned unchanged.
pub fn save_preferences(
    backend: &dyn DocumentBackend,
    user: &UserId,
    goal: &BudgetGoal,
    notifier: &dyn Notifier,
) -> FinanceResult<PreferenceSave> {
    match backend.save_preferences(user, goal) {
        Ok(()) => {
            backend.clear_local_preferences(user)?;
            Ok(PreferenceSave::Remote)
        }
        Err(FinanceError::PermissionDenied(reason)) => {
            tracing::warn!(user = %user, %reason, "preference write refused, keeping local copy");
            backend.save_local_preferences(user, goal)?;
            notifier.warning(
                "Preferences saved locally",
                "Your budget goal was saved on this device only.",
            );
            Ok(PreferenceSave::LocalOnly)
        }
        Err(other) => Err(other),
    }
}

/// The user's goal: the local copy if one exists, else the remote one
///
/// A local copy only exists while the remote holds a stale goal. Missing
/// documents give `None`; a refused remote read falls through to `None`.
pub fn load_preferences(
    backend: &dyn DocumentBackend,
    user: &UserId,
) -> FinanceResult<Option<BudgetGoal>> {
    if let Some(local) = backend.load_local_preferences(user)? {
        return Ok(Some(local));
    }
    match backend.load_preferences(user) {
        Ok(goal) => Ok(goal),
        Err(FinanceError::PermissionDenied(reason)) => {
            tracing::warn!(user = %user, %reason, "preference read refused");
            Ok(None)
        }
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::YearMonth;
    use crate::notify::{MemoryNotifier, NotificationKind};
    use crate::storage::memory_backend::{FailureMode, MemoryBackend};

    fn alice() -> UserId {
        UserId::parse("alice").unwrap()
    }

    fn goal(general: u8) -> BudgetGoal {
        BudgetGoal {
            general_percent: general,
            monthly_percent: 100,
            reference_month: YearMonth::new(2025, 1).unwrap(),
        }
    }

    #[test]
    fn test_remote_save() {
        let backend = MemoryBackend::new();
        let notifier = MemoryNotifier::new();

        let saved = save_preferences(&backend, &alice(), &goal(80), &notifier).unwrap();

        assert_eq!(saved, PreferenceSave::Remote);
        assert_eq!(load_preferences(&backend, &alice()).unwrap(), Some(goal(80)));
        assert!(notifier.delivered().is_empty());
    }

    #[test]
    fn test_permission_denied_falls_back_to_local() {
        let backend = MemoryBackend::new();
        let notifier = MemoryNotifier::new();
        backend.set_failure(Some(FailureMode::PermissionDenied)).unwrap();

        let saved = save_preferences(&backend, &alice(), &goal(70), &notifier).unwrap();

        assert_eq!(saved, PreferenceSave::LocalOnly);
        assert_eq!(notifier.count(NotificationKind::Warning), 1);
        assert!(notifier.delivered()[0].message.contains("this device only"));
        assert_eq!(load_preferences(&backend, &alice()).unwrap(), Some(goal(70)));
    }

    #[test]
    fn test_remote_failure_is_returned() {
        let backend = MemoryBackend::new();
        let notifier = MemoryNotifier::new();
        backend.set_failure(Some(FailureMode::Remote)).unwrap();

        let result = save_preferences(&backend, &alice(), &goal(70), &notifier);

        assert!(matches!(result, Err(FinanceError::Remote(_))));
        assert!(notifier.delivered().is_empty());
        assert_eq!(load_preferences(&backend, &alice()).unwrap(), None);
    }

    #[test]
    fn test_successful_save_clears_local_copy() {
        let backend = MemoryBackend::new();
        let notifier = MemoryNotifier::new();
        backend.set_failure(Some(FailureMode::PermissionDenied)).unwrap();
        save_preferences(&backend, &alice(), &goal(70), &notifier).unwrap();

        backend.set_failure(None).unwrap();
        save_preferences(&backend, &alice(), &goal(90), &notifier).unwrap();

        assert_eq!(backend.load_local_preferences(&alice()).unwrap(), None);
        assert_eq!(load_preferences(&backend, &alice()).unwrap(), Some(goal(90)));
    }
}
