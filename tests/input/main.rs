// Input validation tests
