use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use clubhouse_core::{DomainError, DomainResult, PaymentId, PlayerId};

/// Dues status. `pending -> paid`, `pending -> overdue -> paid`; there is no
/// unpay in the contract.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Overdue,
}

impl PaymentStatus {
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!(
            (self, next),
            (Pending, Paid) | (Pending, Overdue) | (Overdue, Paid)
        ) || self == next
    }
}

/// One month of dues for one player. Amounts are integer minor-currency
/// units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    pub id: PaymentId,
    pub player_id: PlayerId,
    pub amount: i64,
    pub due_date: NaiveDate,
    pub paid_date: Option<NaiveDate>,
    pub status: PaymentStatus,
    pub month: u32,
    pub year: i32,
    pub method: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaymentDraft {
    pub player_id: PlayerId,
    pub amount: i64,
    pub due_date: NaiveDate,
    pub month: u32,
    pub year: i32,
    pub method: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaymentPatch {
    pub amount: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub status: Option<PaymentStatus>,
    pub method: Option<String>,
    pub notes: Option<String>,
}

impl Payment {
    pub fn create(draft: PaymentDraft, now: DateTime<Utc>) -> DomainResult<Self> {
        if !(1..=12).contains(&draft.month) {
            return Err(DomainError::validation("month must be between 1 and 12"));
        }
        if draft.amount <= 0 {
            return Err(DomainError::validation("amount must be positive"));
        }
        Ok(Self {
            id: PaymentId::new(),
            player_id: draft.player_id,
            amount: draft.amount,
            due_date: draft.due_date,
            paid_date: None,
            status: PaymentStatus::Pending,
            month: draft.month,
            year: draft.year,
            method: draft.method,
            notes: draft.notes,
            created_at: now,
        })
    }

    /// Apply a partial update. Status changes go through the transition
    /// rules; marking paid stamps `paid_date` and is idempotent (a repeat
    /// keeps the original date).
    pub fn apply(&mut self, patch: PaymentPatch, today: NaiveDate) -> DomainResult<()> {
        if let Some(next) = patch.status {
            if !self.status.can_transition_to(next) {
                return Err(DomainError::validation(format!(
                    "cannot move payment from {:?} to {next:?}",
                    self.status
                )));
            }
            if next == PaymentStatus::Paid && self.paid_date.is_none() {
                self.paid_date = Some(today);
            }
            self.status = next;
        }
        if let Some(amount) = patch.amount {
            if amount <= 0 {
                return Err(DomainError::validation("amount must be positive"));
            }
            self.amount = amount;
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        if let Some(method) = patch.method {
            self.method = Some(method);
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(month: u32) -> PaymentDraft {
        PaymentDraft {
            player_id: PlayerId::new(),
            amount: 2500,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 10).unwrap(),
            month,
            year: 2026,
            method: None,
            notes: None,
        }
    }

    fn paid_patch() -> PaymentPatch {
        PaymentPatch {
            status: Some(PaymentStatus::Paid),
            ..Default::default()
        }
    }

    #[test]
    fn month_outside_range_is_rejected() {
        for month in [0, 13] {
            assert!(matches!(
                Payment::create(draft(month), Utc::now()),
                Err(DomainError::Validation(_))
            ));
        }
        assert!(Payment::create(draft(12), Utc::now()).is_ok());
    }

    #[test]
    fn mark_paid_stamps_date_and_is_idempotent() {
        let mut payment = Payment::create(draft(3), Utc::now()).unwrap();
        let first = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let later = NaiveDate::from_ymd_opt(2026, 3, 20).unwrap();

        payment.apply(paid_patch(), first).unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.paid_date, Some(first));

        // Second call converges on the same final state.
        payment.apply(paid_patch(), later).unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
        assert_eq!(payment.paid_date, Some(first));
    }

    #[test]
    fn overdue_then_paid_is_allowed() {
        let mut payment = Payment::create(draft(3), Utc::now()).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();

        payment
            .apply(
                PaymentPatch {
                    status: Some(PaymentStatus::Overdue),
                    ..Default::default()
                },
                today,
            )
            .unwrap();
        payment.apply(paid_patch(), today).unwrap();
        assert_eq!(payment.status, PaymentStatus::Paid);
    }

    #[test]
    fn unpay_is_rejected() {
        let mut payment = Payment::create(draft(3), Utc::now()).unwrap();
        let today = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        payment.apply(paid_patch(), today).unwrap();

        for next in [PaymentStatus::Pending, PaymentStatus::Overdue] {
            let err = payment
                .apply(
                    PaymentPatch {
                        status: Some(next),
                        ..Default::default()
                    },
                    today,
                )
                .unwrap_err();
            assert!(matches!(err, DomainError::Validation(_)));
        }
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        let mut d = draft(3);
        d.amount = 0;
        assert!(Payment::create(d, Utc::now()).is_err());
    }
}
