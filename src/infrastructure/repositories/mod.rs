// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces over spreadsheets

pub mod spreadsheet_action_item_repository;
pub mod spreadsheet_goal_repository;
pub mod spreadsheet_sales_repository;
pub mod spreadsheet_user_repository;

pub use spreadsheet_action_item_repository::SpreadsheetActionItemRepository;
pub use spreadsheet_goal_repository::SpreadsheetGoalRepository;
pub use spreadsheet_sales_repository::SpreadsheetSalesRepository;
pub use spreadsheet_user_repository::SpreadsheetUserRepository;
