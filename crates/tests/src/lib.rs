#[cfg(test)]
mod common;


#[cfg(test)]
mod dashboard_tests;

#[cfg(test)]
mod session_tests;

#[cfg(test)]
mod rest_api_tests;
