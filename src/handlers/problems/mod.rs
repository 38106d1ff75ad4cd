// handlers/problems/mod.rs - Problem handlers
//
// GET    /problems       → list
// GET    /problems/:id   → show
// DELETE /problems/:id   → delete
// POST   /addproblem     → add (create or re-solve)
// GET    /dueproblems    → due
pub mod add;
pub mod delete;
pub mod due;
pub mod list;
pub mod show;
pub mod utils;

pub use add::problem_add;
pub use delete::problem_delete;
pub use due::problem_due;
pub use list::problem_list;
pub use show::problem_show;
