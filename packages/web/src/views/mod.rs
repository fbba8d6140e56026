mod login;
pub use login::Login;

mod not_found;
pub use not_found::NotFound;

mod prompt_detail;
pub use prompt_detail::PromptDetail;

mod prompt_new;
pub use prompt_new::PromptNew;

mod prompts;
pub use prompts::Prompts;

mod protected;
pub use protected::Protected;
