//! Chart-of-accounts registry
//!
//! Creation, edit, and soft-deactivation of ledger accounts, with the
//! type-consistency rules the rest of the reporting core relies on: a parent
//! account and any classification group must share the account's type.

use uuid::Uuid;

use crate::traits::*;
use crate::types::*;

/// Parameters for creating an account
pub struct NewAccount {
    pub code: String,
    pub name: String,
    pub account_type: AccountType,
    /// Explicit normal-balance override; defaults from the type when absent
    pub normal_balance: Option<BalanceSide>,
    pub group_id: Option<String>,
    pub sub_group_id: Option<String>,
    pub parent_id: Option<String>,
    pub description: Option<String>,
}

impl NewAccount {
    /// Minimal account spec with everything optional left unset
    pub fn new(code: String, name: String, account_type: AccountType) -> Self {
        Self {
            code,
            name,
            account_type,
            normal_balance: None,
            group_id: None,
            sub_group_id: None,
            parent_id: None,
            description: None,
        }
    }
}

/// Registry for chart-of-accounts operations
pub struct AccountRegistry<S: FinanceStore> {
    pub(crate) storage: S,
    validator: Box<dyn AccountValidator>,
}

impl<S: FinanceStore> AccountRegistry<S> {
    /// Create a new registry with the default validator
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            validator: Box::new(DefaultAccountValidator),
        }
    }

    /// Create a new registry with a custom validator
    pub fn with_validator(storage: S, validator: Box<dyn AccountValidator>) -> Self {
        Self { storage, validator }
    }

    /// Create a new account.
    ///
    /// Fails with [`FinanceError::Validation`] on an empty or malformed code
    /// or name, a duplicate code, or a parent/group whose type differs from
    /// the account's.
    pub async fn create_account(&mut self, spec: NewAccount) -> FinanceResult<Account> {
        let mut account = Account::new(
            Uuid::new_v4().to_string(),
            spec.code,
            spec.name,
            spec.account_type,
        );
        if let Some(side) = spec.normal_balance {
            account.normal_balance = side;
        }
        account.group_id = spec.group_id;
        account.sub_group_id = spec.sub_group_id;
        account.parent_id = spec.parent_id;
        account.description = spec.description;

        self.validator.validate_account(&account)?;

        let existing = self.storage.list_accounts(None).await?;
        if existing.iter().any(|a| a.code == account.code) {
            return Err(FinanceError::Validation(format!(
                "Account with code '{}' already exists",
                account.code
            )));
        }

        self.check_parent(&account).await?;
        self.check_groups(&account).await?;

        self.storage.save_account(&account).await?;
        tracing::debug!(code = %account.code, name = %account.name, "account created");

        Ok(account)
    }

    /// Update an existing account. Re-runs the same consistency checks as
    /// creation plus parent-cycle detection; never re-derives the normal
    /// balance from the type.
    pub async fn update_account(&mut self, account: &Account) -> FinanceResult<()> {
        self.validator.validate_account(account)?;

        if self.storage.get_account(&account.id).await?.is_none() {
            return Err(FinanceError::AccountNotFound(account.id.clone()));
        }

        self.check_parent(account).await?;
        self.check_groups(account).await?;
        self.check_no_parent_cycle(account).await?;

        self.storage.update_account(account).await
    }

    /// Toggle an account's active flag. Inactive accounts drop out of
    /// new-posting pickers; historical reports are unaffected.
    pub async fn set_active(&mut self, account_id: &str, active: bool) -> FinanceResult<Account> {
        let mut account = self.get_account_required(account_id).await?;
        account.is_active = active;
        account.updated_at = chrono::Utc::now().naive_utc();
        self.storage.update_account(&account).await?;
        tracing::debug!(code = %account.code, active, "account activation changed");
        Ok(account)
    }

    /// Get an account by id
    pub async fn get_account(&self, account_id: &str) -> FinanceResult<Option<Account>> {
        self.storage.get_account(account_id).await
    }

    /// Get an account by id, returning an error if not found
    pub async fn get_account_required(&self, account_id: &str) -> FinanceResult<Account> {
        self.storage
            .get_account(account_id)
            .await?
            .ok_or_else(|| FinanceError::AccountNotFound(account_id.to_string()))
    }

    /// List all accounts, active and inactive
    pub async fn list_accounts(&self) -> FinanceResult<Vec<Account>> {
        self.storage.list_accounts(None).await
    }

    /// List accounts of one type
    pub async fn list_accounts_by_type(
        &self,
        account_type: AccountType,
    ) -> FinanceResult<Vec<Account>> {
        self.storage.list_accounts(Some(account_type)).await
    }

    /// List direct children of an account
    pub async fn list_children(&self, parent_id: &str) -> FinanceResult<Vec<Account>> {
        let accounts = self.storage.list_accounts(None).await?;
        Ok(accounts
            .into_iter()
            .filter(|account| account.parent_id.as_deref() == Some(parent_id))
            .collect())
    }

    /// Classification groups offered by the account form, filtered to the
    /// type of the account being edited
    pub async fn group_options(
        &self,
        account_type: AccountType,
    ) -> FinanceResult<Vec<AccountGroup>> {
        self.storage.list_groups(Some(account_type)).await
    }

    async fn check_parent(&self, account: &Account) -> FinanceResult<()> {
        if let Some(ref parent_id) = account.parent_id {
            match self.storage.get_account(parent_id).await? {
                None => {
                    return Err(FinanceError::Validation(format!(
                        "Parent account '{parent_id}' does not exist"
                    )));
                }
                Some(parent) if parent.account_type != account.account_type => {
                    return Err(FinanceError::Validation(format!(
                        "Parent account '{}' has a different type",
                        parent.code
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    async fn check_groups(&self, account: &Account) -> FinanceResult<()> {
        for group_id in [account.group_id.as_ref(), account.sub_group_id.as_ref()]
            .into_iter()
            .flatten()
        {
            match self.storage.get_group(group_id).await? {
                None => {
                    return Err(FinanceError::Validation(format!(
                        "Group '{group_id}' does not exist"
                    )));
                }
                Some(group) if group.account_type != account.account_type => {
                    return Err(FinanceError::Validation(format!(
                        "Group '{}' has a different type",
                        group.name
                    )));
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    async fn check_no_parent_cycle(&self, account: &Account) -> FinanceResult<()> {
        let mut current = account.parent_id.clone();
        let mut seen = std::collections::HashSet::new();

        while let Some(id) = current {
            if id == account.id || !seen.insert(id.clone()) {
                return Err(FinanceError::Validation(format!(
                    "Parent assignment would create a cycle through account '{}'",
                    account.code
                )));
            }
            current = match self.storage.get_account(&id).await? {
                Some(parent) => parent.parent_id,
                None => None,
            };
        }

        Ok(())
    }
}
