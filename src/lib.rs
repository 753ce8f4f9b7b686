pub mod decimal;
pub mod emi;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod loan;
pub mod payment;
pub mod schedule;
pub mod serialization;
pub mod state;
pub mod summary;
pub mod terms;
pub mod types;

// re-export key types
pub use decimal::{Money, Rate};
pub use emi::emi_for;
pub use errors::{LoanError, Result};
pub use events::{EventStore, LoanEvent};
pub use ledger::{replay, PaymentLedger};
pub use loan::Loan;
pub use payment::{Payment, PaymentDraft};
pub use schedule::{build_schedule, months_to_amortize, Schedule, ScheduleRow, MAX_SCHEDULE_MONTHS};
pub use serialization::LoanView;
pub use state::LoanState;
pub use summary::{summarize, PortfolioSummary};
pub use terms::LoanTerms;
pub use types::{LoanId, LoanStatus, PaymentId, PaymentKind, PrepaymentAction};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
