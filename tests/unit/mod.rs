/// Unit test target: checks on the public types and engine functions
mod basic_tests;
