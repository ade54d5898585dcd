//! UI Components
//!
//! Shared widgets and one module per screen.

pub mod tasks;

mod delete_confirm_button;
mod field;
mod guards;
mod loading;
mod modal;
mod navbar;

mod bulk_contribution_form;
mod contribution_ledger;
mod contribution_matrix;
mod deposits;
mod documents;
mod loans;
mod login;
mod member_dashboard;
mod members;
mod notifications;
mod public;
mod sessions;
mod statements;
mod vdf_deposits;
mod vdf_expenses;
mod vdf_families;

pub use delete_confirm_button::DeleteConfirmButton;
pub use field::{CheckboxField, FormError, MemberSelect, TextField};
pub use guards::{AdminGuard, MemberGuard};
pub use loading::{EmptyRow, LoadingIndicator};
pub use modal::Modal;
pub use navbar::Navbar;

pub use bulk_contribution_form::BulkContributionForm;
pub use contribution_ledger::ContributionLedger;
pub use contribution_matrix::{ContributionMatrixPage, MatrixFilters, MatrixTable};
pub use deposits::DepositsPage;
pub use documents::{AdminMemberDocuments, MemberDocuments};
pub use loans::LoansPage;
pub use login::{AdminLoginPage, MemberLoginPage};
pub use member_dashboard::MemberDashboardPage;
pub use members::MembersPage;
pub use notifications::{AdminNotificationsPage, MemberNotifications, NotificationBell};
pub use public::{
    PublicDeposits, PublicLoans, PublicSummary, PublicVdf, PublicVdfContributions, PublicVdfExpenses, VdfSummaryCards,
};
pub use sessions::SessionsPage;
pub use statements::{ReportPage, StatementDetail, StatementPage, SummaryCards};
pub use vdf_deposits::VdfDepositsPage;
pub use vdf_expenses::{ExpenseTable, VdfExpensesPage};
pub use vdf_families::VdfFamiliesPage;
