use loan_admin::domain::intent::Decision;
use loan_admin::domain::loan::{Loan, LoanId};
use loan_admin::domain::ports::{LoanService, LoanServiceRef};
use loan_admin::infrastructure::in_memory::InMemoryLoanService;
use std::sync::Arc;

#[tokio::test]
async fn test_service_as_shared_trait_object() {
    let loans = vec![
        Loan::new(LoanId::new("l1").unwrap()).with_attribute("amount", 1500),
        Loan::new(LoanId::new("l2").unwrap()),
    ];
    let service: LoanServiceRef = Arc::new(InMemoryLoanService::with_loans(loans));

    // Verify Send + Sync by using the service from spawned tasks
    let deciding = Arc::clone(&service);
    let decision = tokio::spawn(async move {
        deciding
            .decide(&LoanId::new("l1").unwrap(), Decision::Approve)
            .await
    });
    decision.await.unwrap().unwrap();

    let listing = Arc::clone(&service);
    let remaining = tokio::spawn(async move { listing.list_pending_loans().await })
        .await
        .unwrap()
        .unwrap();

    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id.as_str(), "l2");
}
