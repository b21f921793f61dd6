pub mod logging_email_service;
