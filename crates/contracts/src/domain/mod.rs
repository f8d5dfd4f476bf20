pub mod a001_application_form;
