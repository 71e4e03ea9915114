//! Payslip generation service.
//!
//! [`PayslipService`] ties the calculator, the storage ports and a document
//! renderer together. It holds no mutable state of its own; every guarantee
//! about uniqueness comes from the payslip store.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::calculation::{calculate_payslip, validate_adjustments};
use crate::config::EngineConfig;
use crate::document::{DocumentModel, DocumentRenderer, compose_payslip_document, suggested_file_name};
use crate::error::{EngineError, EngineResult};
use crate::models::{AuditStep, EmployeeSnapshot, Money, NewPayslip, PayPeriod, Payslip};
use crate::store::{EmployeeStore, PayslipStore, StoreError};

/// Number of payslips shown in an employee's recent payslip view.
pub const RECENT_PAYSLIP_LIMIT: usize = 5;

/// Input for [`PayslipService::generate_payslip`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratePayslipRequest {
    /// The employee to pay.
    pub employee_id: String,
    /// Any date inside the requested month.
    pub period: NaiveDate,
    /// Overtime hours worked in the period.
    pub overtime_hours: Decimal,
    /// Bonus for the period.
    pub bonus: Money,
}

/// A newly generated payslip together with its calculation trail.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedPayslip {
    /// The persisted payslip.
    pub payslip: Payslip,
    /// How each amount was derived. Not persisted.
    pub audit_steps: Vec<AuditStep>,
}

/// An encoded payslip document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedDocument {
    /// Encoded document bytes.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`.
    pub content_type: &'static str,
    /// Suggested download file name.
    pub file_name: String,
}

/// Generates, lists and renders payslips.
#[derive(Clone)]
pub struct PayslipService {
    employees: Arc<dyn EmployeeStore>,
    payslips: Arc<dyn PayslipStore>,
    renderer: Arc<dyn DocumentRenderer>,
    config: Arc<EngineConfig>,
}

impl PayslipService {
    /// Creates a service over the given stores, renderer and configuration.
    pub fn new(
        employees: Arc<dyn EmployeeStore>,
        payslips: Arc<dyn PayslipStore>,
        renderer: Arc<dyn DocumentRenderer>,
        config: EngineConfig,
    ) -> Self {
        Self {
            employees,
            payslips,
            renderer,
            config: Arc::new(config),
        }
    }

    /// The configuration in use.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Generates and persists the payslip for an employee and month.
    ///
    /// The requested date is normalized to the first day of its month before
    /// any check. Inputs are validated before the stores are touched.
    ///
    /// # Errors
    ///
    /// - [`EngineError::InvalidInput`] for out-of-domain hours or bonus
    /// - [`EngineError::EmployeeNotFound`] if the employee does not exist
    /// - [`EngineError::DuplicatePeriod`] if a payslip already exists for the
    ///   employee and period, including when a concurrent call won the insert
    /// - [`EngineError::PersistenceFailure`] for any other store fault
    pub async fn generate_payslip(
        &self,
        request: GeneratePayslipRequest,
    ) -> EngineResult<GeneratedPayslip> {
        let period = PayPeriod::containing(request.period);
        validate_adjustments(request.overtime_hours, request.bonus, &self.config.rates)?;

        let employee = self.require_employee(&request.employee_id).await?;

        let existing = self
            .payslips
            .find_by_employee_and_period(&employee.id, period)
            .await
            .map_err(persistence_failure)?;
        if existing.is_some() {
            warn!(employee_id = %employee.id, %period, "Payslip already exists for period");
            return Err(duplicate_period(&employee.id, period));
        }

        let calculation = calculate_payslip(
            &employee,
            request.overtime_hours,
            request.bonus,
            &self.config.rates,
        )?;

        let new_payslip = NewPayslip {
            employee_id: employee.id.clone(),
            period,
            fields: calculation.fields,
            generated_at: Utc::now(),
        };

        let payslip = match self.payslips.insert(new_payslip).await {
            Ok(payslip) => payslip,
            Err(StoreError::ConstraintViolation { .. }) => {
                warn!(
                    employee_id = %employee.id,
                    %period,
                    "Concurrent payslip generation rejected by uniqueness constraint"
                );
                return Err(duplicate_period(&employee.id, period));
            }
            Err(e) => return Err(persistence_failure(e)),
        };

        info!(
            payslip_id = payslip.id,
            employee_id = %payslip.employee_id,
            period = %payslip.period,
            total_pay = %payslip.total_pay,
            "Generated payslip"
        );

        Ok(GeneratedPayslip {
            payslip,
            audit_steps: calculation.audit_steps,
        })
    }

    /// Fetches a payslip by id.
    pub async fn get_payslip(&self, payslip_id: i64) -> EngineResult<Payslip> {
        self.payslips
            .get(payslip_id)
            .await
            .map_err(persistence_failure)?
            .ok_or(EngineError::PayslipNotFound { payslip_id })
    }

    /// Lists an employee's payslips, most recent period first.
    pub async fn list_payslips(&self, employee_id: &str) -> EngineResult<Vec<Payslip>> {
        let employee = self.require_employee(employee_id).await?;
        self.payslips
            .list_for_employee(&employee.id)
            .await
            .map_err(persistence_failure)
    }

    /// Lists at most `limit` of an employee's most recent payslips.
    pub async fn recent_payslips(
        &self,
        employee_id: &str,
        limit: usize,
    ) -> EngineResult<Vec<Payslip>> {
        let mut payslips = self.list_payslips(employee_id).await?;
        payslips.truncate(limit);
        Ok(payslips)
    }

    /// Builds the document model for a stored payslip.
    ///
    /// Identity fields come from the employee's current record; every amount
    /// comes from the payslip as stored.
    pub async fn compose_document(&self, payslip_id: i64) -> EngineResult<DocumentModel> {
        let (employee, payslip) = self.load_for_document(payslip_id).await?;
        Ok(compose_payslip_document(
            &employee,
            &payslip,
            &self.config.organization,
            &self.config.currency,
        ))
    }

    /// Composes and encodes the document for a stored payslip.
    ///
    /// Read-only. Rendering the same payslip twice yields identical bytes.
    pub async fn render_payslip_document(&self, payslip_id: i64) -> EngineResult<RenderedDocument> {
        let (employee, payslip) = self.load_for_document(payslip_id).await?;
        let document = compose_payslip_document(
            &employee,
            &payslip,
            &self.config.organization,
            &self.config.currency,
        );

        let bytes = self.renderer.encode(&document).inspect_err(|e| {
            error!(payslip_id, error = %e, "Failed to encode payslip document");
        })?;
        debug!(payslip_id, size = bytes.len(), "Rendered payslip document");

        Ok(RenderedDocument {
            bytes,
            content_type: self.renderer.content_type(),
            file_name: suggested_file_name(
                &employee.name,
                &payslip,
                self.renderer.file_extension(),
            ),
        })
    }

    async fn load_for_document(&self, payslip_id: i64) -> EngineResult<(EmployeeSnapshot, Payslip)> {
        let payslip = self.get_payslip(payslip_id).await?;
        let employee = self.require_employee(&payslip.employee_id).await?;
        Ok((employee, payslip))
    }

    async fn require_employee(&self, employee_id: &str) -> EngineResult<EmployeeSnapshot> {
        self.employees
            .get_employee(employee_id)
            .await
            .map_err(persistence_failure)?
            .ok_or_else(|| EngineError::EmployeeNotFound {
                employee_id: employee_id.to_string(),
            })
    }
}

fn duplicate_period(employee_id: &str, period: PayPeriod) -> EngineError {
    EngineError::DuplicatePeriod {
        employee_id: employee_id.to_string(),
        period: period.first_day(),
    }
}

fn persistence_failure(e: StoreError) -> EngineError {
    error!(error = %e, "Payslip store failure");
    EngineError::PersistenceFailure {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::{JsonRenderer, TextRenderer};
    use crate::models::EmploymentType;
    use crate::store::InMemoryStore;
    use async_trait::async_trait;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn money(s: &str) -> Money {
        Money::from_str(s).unwrap()
    }

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn create_test_employee(id: &str, employment_type: EmploymentType) -> EmployeeSnapshot {
        EmployeeSnapshot {
            id: id.to_string(),
            name: "Aisyah Binti Rahman".to_string(),
            department: "Finance".to_string(),
            position: "Accountant".to_string(),
            base_salary: money("3000.00"),
            employment_type,
        }
    }

    fn request(employee_id: &str, period: NaiveDate, hours: &str, bonus: &str) -> GeneratePayslipRequest {
        GeneratePayslipRequest {
            employee_id: employee_id.to_string(),
            period,
            overtime_hours: dec(hours),
            bonus: money(bonus),
        }
    }

    fn create_service(store: Arc<InMemoryStore>) -> PayslipService {
        PayslipService::new(
            store.clone(),
            store,
            Arc::new(JsonRenderer),
            EngineConfig::default(),
        )
    }

    fn seeded_store() -> Arc<InMemoryStore> {
        Arc::new(InMemoryStore::with_employees([
            create_test_employee("E001", EmploymentType::FullTime),
            create_test_employee("E002", EmploymentType::PartTime),
        ]))
    }

    /// Payslip store whose pre-check never sees existing rows.
    struct BlindPreCheck(Arc<InMemoryStore>);

    #[async_trait]
    impl PayslipStore for BlindPreCheck {
        async fn find_by_employee_and_period(
            &self,
            _employee_id: &str,
            _period: PayPeriod,
        ) -> Result<Option<Payslip>, StoreError> {
            Ok(None)
        }

        async fn insert(&self, payslip: NewPayslip) -> Result<Payslip, StoreError> {
            self.0.insert(payslip).await
        }

        async fn get(&self, payslip_id: i64) -> Result<Option<Payslip>, StoreError> {
            self.0.get(payslip_id).await
        }

        async fn list_for_employee(&self, employee_id: &str) -> Result<Vec<Payslip>, StoreError> {
            self.0.list_for_employee(employee_id).await
        }
    }

    struct FailingStore;

    #[async_trait]
    impl PayslipStore for FailingStore {
        async fn find_by_employee_and_period(
            &self,
            _employee_id: &str,
            _period: PayPeriod,
        ) -> Result<Option<Payslip>, StoreError> {
            Ok(None)
        }

        async fn insert(&self, _payslip: NewPayslip) -> Result<Payslip, StoreError> {
            Err(StoreError::Backend {
                message: "disk full".to_string(),
            })
        }

        async fn get(&self, _payslip_id: i64) -> Result<Option<Payslip>, StoreError> {
            Ok(None)
        }

        async fn list_for_employee(&self, _employee_id: &str) -> Result<Vec<Payslip>, StoreError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_generate_payslip() {
        let store = seeded_store();
        let service = create_service(store.clone());

        let generated = service
            .generate_payslip(request("E001", date(2024, 3, 17), "4", "200.00"))
            .await
            .unwrap();
        let payslip = &generated.payslip;

        assert_eq!(payslip.id, 1);
        assert_eq!(payslip.period.first_day(), date(2024, 3, 1));
        assert_eq!(payslip.base_salary, money("3000.00"));
        assert_eq!(payslip.overtime_pay, money("80.00"));
        assert_eq!(payslip.bonus, money("200.00"));
        assert_eq!(payslip.epf, money("330.00"));
        assert_eq!(payslip.socso, money("15.00"));
        assert_eq!(payslip.total_pay, money("2935.00"));
        assert_eq!(generated.audit_steps.len(), 4);
        assert_eq!(store.payslip_count().await, 1);
    }

    #[tokio::test]
    async fn test_part_time_rate() {
        let service = create_service(seeded_store());
        let generated = service
            .generate_payslip(request("E002", date(2024, 3, 1), "10", "0"))
            .await
            .unwrap();
        assert_eq!(generated.payslip.overtime_pay, money("150.00"));
    }

    #[tokio::test]
    async fn test_unknown_employee() {
        let service = create_service(seeded_store());
        let result = service
            .generate_payslip(request("E404", date(2024, 3, 1), "0", "0"))
            .await;
        match result {
            Err(EngineError::EmployeeNotFound { employee_id }) => assert_eq!(employee_id, "E404"),
            other => panic!("Expected EmployeeNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_invalid_input_checked_before_lookup() {
        // The employee does not exist, but the bad input is reported first.
        let service = create_service(seeded_store());
        let result = service
            .generate_payslip(request("E404", date(2024, 3, 1), "-1", "0"))
            .await;
        assert!(matches!(result, Err(EngineError::InvalidInput { .. })));
    }

    #[tokio::test]
    async fn test_duplicate_period_normalized() {
        let store = seeded_store();
        let service = create_service(store.clone());

        service
            .generate_payslip(request("E001", date(2024, 3, 17), "0", "0"))
            .await
            .unwrap();
        let result = service
            .generate_payslip(request("E001", date(2024, 3, 1), "5", "100.00"))
            .await;

        match result {
            Err(EngineError::DuplicatePeriod {
                employee_id,
                period,
            }) => {
                assert_eq!(employee_id, "E001");
                assert_eq!(period, date(2024, 3, 1));
            }
            other => panic!("Expected DuplicatePeriod, got {:?}", other),
        }
        assert_eq!(store.payslip_count().await, 1);
    }

    #[tokio::test]
    async fn test_constraint_violation_maps_to_duplicate_period() {
        let store = seeded_store();
        let service = PayslipService::new(
            store.clone(),
            Arc::new(BlindPreCheck(store.clone())),
            Arc::new(JsonRenderer),
            EngineConfig::default(),
        );

        service
            .generate_payslip(request("E001", date(2024, 3, 1), "0", "0"))
            .await
            .unwrap();
        let result = service
            .generate_payslip(request("E001", date(2024, 3, 9), "0", "0"))
            .await;
        assert!(matches!(result, Err(EngineError::DuplicatePeriod { .. })));
        assert_eq!(store.payslip_count().await, 1);
    }

    #[tokio::test]
    async fn test_store_failure_is_persistence_failure() {
        let store = seeded_store();
        let service = PayslipService::new(
            store,
            Arc::new(FailingStore),
            Arc::new(JsonRenderer),
            EngineConfig::default(),
        );
        let result = service
            .generate_payslip(request("E001", date(2024, 3, 1), "0", "0"))
            .await;
        match result {
            Err(EngineError::PersistenceFailure { message }) => assert!(message.contains("disk full")),
            other => panic!("Expected PersistenceFailure, got {:?}", other),
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_generation_single_winner() {
        let store = seeded_store();
        let service = PayslipService::new(
            store.clone(),
            Arc::new(BlindPreCheck(store.clone())),
            Arc::new(JsonRenderer),
            EngineConfig::default(),
        );

        let handles: Vec<_> = (0..16)
            .map(|day| {
                let service = service.clone();
                tokio::spawn(async move {
                    service
                        .generate_payslip(request("E001", date(2024, 6, day + 1), "1", "0"))
                        .await
                })
            })
            .collect();

        let mut successes = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => successes += 1,
                Err(EngineError::DuplicatePeriod { .. }) => duplicates += 1,
                Err(other) => panic!("Unexpected error: {:?}", other),
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(duplicates, 15);
        assert_eq!(store.payslip_count().await, 1);
    }

    #[tokio::test]
    async fn test_salary_edit_does_not_change_existing_payslip() {
        let store = seeded_store();
        let service = create_service(store.clone());

        let generated = service
            .generate_payslip(request("E001", date(2024, 3, 1), "0", "0"))
            .await
            .unwrap();

        let mut raised = create_test_employee("E001", EmploymentType::FullTime);
        raised.base_salary = money("9000.00");
        store.upsert_employee(raised).await;

        let stored = service.get_payslip(generated.payslip.id).await.unwrap();
        assert_eq!(stored.base_salary, money("3000.00"));
        assert_eq!(stored.total_pay, money("2655.00"));

        let next = service
            .generate_payslip(request("E001", date(2024, 4, 1), "0", "0"))
            .await
            .unwrap();
        assert_eq!(next.payslip.base_salary, money("9000.00"));
    }

    #[tokio::test]
    async fn test_list_and_recent_payslips() {
        let service = create_service(seeded_store());
        for month in 1..=7 {
            service
                .generate_payslip(request("E001", date(2024, month, 15), "0", "0"))
                .await
                .unwrap();
        }

        let all = service.list_payslips("E001").await.unwrap();
        assert_eq!(all.len(), 7);
        assert_eq!(all[0].period.month(), 7);
        assert_eq!(all[6].period.month(), 1);

        let recent = service
            .recent_payslips("E001", RECENT_PAYSLIP_LIMIT)
            .await
            .unwrap();
        let months: Vec<u32> = recent.iter().map(|p| p.period.month()).collect();
        assert_eq!(months, vec![7, 6, 5, 4, 3]);

        assert!(service.list_payslips("E002").await.unwrap().is_empty());
        assert!(matches!(
            service.list_payslips("E404").await,
            Err(EngineError::EmployeeNotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_render_payslip_document() {
        let service = create_service(seeded_store());
        let generated = service
            .generate_payslip(request("E001", date(2024, 3, 1), "4", "200.00"))
            .await
            .unwrap();

        let rendered = service
            .render_payslip_document(generated.payslip.id)
            .await
            .unwrap();
        assert_eq!(rendered.content_type, "application/json");
        assert_eq!(rendered.file_name, "Payslip_Aisyah_Binti_Rahman_2024_03.json");

        let document: DocumentModel = serde_json::from_slice(&rendered.bytes).unwrap();
        assert_eq!(document.net_pay().unwrap().amount, "RM 2,935.00");
    }

    #[tokio::test]
    async fn test_render_is_deterministic() {
        let store = seeded_store();
        let service = PayslipService::new(
            store.clone(),
            store,
            Arc::new(TextRenderer::default()),
            EngineConfig::default(),
        );
        let generated = service
            .generate_payslip(request("E001", date(2024, 3, 1), "2.5", "0"))
            .await
            .unwrap();

        let first = service.render_payslip_document(generated.payslip.id).await.unwrap();
        let second = service.render_payslip_document(generated.payslip.id).await.unwrap();
        assert_eq!(first.bytes, second.bytes);
        assert_eq!(first.file_name, "Payslip_Aisyah_Binti_Rahman_2024_03.txt");
    }

    #[tokio::test]
    async fn test_render_unknown_payslip() {
        let service = create_service(seeded_store());
        match service.render_payslip_document(42).await {
            Err(EngineError::PayslipNotFound { payslip_id }) => assert_eq!(payslip_id, 42),
            other => panic!("Expected PayslipNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_compose_document_uses_stored_amounts() {
        let store = seeded_store();
        let service = create_service(store.clone());
        let generated = service
            .generate_payslip(request("E001", date(2024, 3, 1), "0", "0"))
            .await
            .unwrap();

        let mut raised = create_test_employee("E001", EmploymentType::FullTime);
        raised.base_salary = money("9000.00");
        store.upsert_employee(raised).await;

        let document = service.compose_document(generated.payslip.id).await.unwrap();
        let basic = document.ledger().unwrap().rows[0].left.clone().unwrap();
        assert_eq!(basic.amount, "RM 3,000.00");
    }
}
