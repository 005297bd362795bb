pub mod api;
pub mod contact_form;
pub mod contact_service;
pub mod errors;
pub mod recaptcha;
pub mod smtp_mailing_util;

pub mod data_structs {
    pub mod app_config;
    pub mod recaptcha_response;

    pub mod requests {
        pub mod contact_submission;
    }

    pub mod responses {
        pub mod status_response;
    }
}
