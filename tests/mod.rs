mod calendar_scenarios;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Basic functionality tests to ensure nothing is broken
// - calendar_scenarios: End-to-end classification scenarios and properties
// - api_mock: The REST client against a mocked backend
// - report_mock: The PDF report against a mocked rendering service
