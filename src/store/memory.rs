use std::collections::{BTreeMap, HashMap};

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{EmployeeStore, PayslipStore, StoreError};
use crate::models::{EmployeeSnapshot, NewPayslip, PayPeriod, Payslip};

#[derive(Debug, Default)]
struct PayslipTable {
    next_id: i64,
    rows: BTreeMap<i64, Payslip>,
    by_employee_period: HashMap<(String, PayPeriod), i64>,
}

/// Process-local store for employees and payslips.
///
/// Payslip ids are assigned sequentially from 1. The uniqueness check and the
/// insert happen under one write lock, so concurrent inserts for the same
/// employee and period cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    employees: RwLock<HashMap<String, EmployeeSnapshot>>,
    payslips: RwLock<PayslipTable>,
}

impl InMemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store seeded with employees.
    pub fn with_employees(employees: impl IntoIterator<Item = EmployeeSnapshot>) -> Self {
        let employees = employees
            .into_iter()
            .map(|employee| (employee.id.clone(), employee))
            .collect();
        Self {
            employees: RwLock::new(employees),
            payslips: RwLock::default(),
        }
    }

    /// Inserts or replaces an employee.
    pub async fn upsert_employee(&self, employee: EmployeeSnapshot) {
        self.employees
            .write()
            .await
            .insert(employee.id.clone(), employee);
    }

    /// Number of stored payslips.
    pub async fn payslip_count(&self) -> usize {
        self.payslips.read().await.rows.len()
    }
}

#[async_trait]
impl EmployeeStore for InMemoryStore {
    async fn get_employee(&self, employee_id: &str) -> Result<Option<EmployeeSnapshot>, StoreError> {
        Ok(self.employees.read().await.get(employee_id).cloned())
    }
}

#[async_trait]
impl PayslipStore for InMemoryStore {
    async fn find_by_employee_and_period(
        &self,
        employee_id: &str,
        period: PayPeriod,
    ) -> Result<Option<Payslip>, StoreError> {
        let table = self.payslips.read().await;
        Ok(table
            .by_employee_period
            .get(&(employee_id.to_string(), period))
            .and_then(|id| table.rows.get(id))
            .cloned())
    }

    async fn insert(&self, payslip: NewPayslip) -> Result<Payslip, StoreError> {
        let mut table = self.payslips.write().await;
        let key = (payslip.employee_id.clone(), payslip.period);
        if table.by_employee_period.contains_key(&key) {
            return Err(StoreError::ConstraintViolation {
                employee_id: payslip.employee_id,
                period: payslip.period.first_day(),
            });
        }

        table.next_id += 1;
        let id = table.next_id;
        let stored = payslip.into_payslip(id);
        table.by_employee_period.insert(key, id);
        table.rows.insert(id, stored.clone());
        debug!(payslip_id = id, employee_id = %stored.employee_id, "Inserted payslip");
        Ok(stored)
    }

    async fn get(&self, payslip_id: i64) -> Result<Option<Payslip>, StoreError> {
        Ok(self.payslips.read().await.rows.get(&payslip_id).cloned())
    }

    async fn list_for_employee(&self, employee_id: &str) -> Result<Vec<Payslip>, StoreError> {
        let table = self.payslips.read().await;
        let mut payslips: Vec<Payslip> = table
            .rows
            .values()
            .filter(|p| p.employee_id == employee_id)
            .cloned()
            .collect();
        payslips.sort_by(|a, b| b.period.cmp(&a.period).then(b.id.cmp(&a.id)));
        Ok(payslips)
    }
}
