pub mod check_txt;
