mod confirm_dialog;
pub use confirm_dialog::ConfirmDialog;

mod login;
pub use login::LoginView;

mod not_found;
pub use not_found::NotFoundView;

mod prompt_editor;
pub use prompt_editor::PromptEditorView;

mod prompt_list;
pub use prompt_list::PromptListView;

mod require_auth;
pub use require_auth::RequireAuth;
