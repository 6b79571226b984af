//! Shared mocks for session, engine, and service tests.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use zonekeeper_provider::{
    CloudflareCredentials, DnsApi, DnsRecord, NewRecord, ProviderError, UpdateRecord, Zone,
};

use crate::error::{CoreError, CoreResult};
use crate::services::ClientFactory;
use crate::traits::AccountStore;
use crate::types::{NewProviderAccount, NewUser, ProviderAccount, User};

fn ts(seq: i64) -> NaiveDateTime {
    NaiveDateTime::default() + chrono::Duration::seconds(seq)
}

/// Scripted provider API. Unscripted calls return empty collections or
/// `RecordNotFound`; scripted errors fire on every call.
#[derive(Default)]
pub struct MockDnsApi {
    zones: Mutex<Vec<Zone>>,
    records: Mutex<Vec<DnsRecord>>,
    verify_error: Mutex<Option<ProviderError>>,
    list_records_error: Mutex<Option<ProviderError>>,
    write_error: Mutex<Option<ProviderError>>,
    verify_calls: AtomicUsize,
    list_zone_calls: AtomicUsize,
    list_record_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

impl MockDnsApi {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_zones(self, zones: Vec<Zone>) -> Self {
        *self.zones.lock().unwrap() = zones;
        self
    }

    #[must_use]
    pub fn with_records(self, records: Vec<DnsRecord>) -> Self {
        *self.records.lock().unwrap() = records;
        self
    }

    #[must_use]
    pub fn fail_verify(self, err: ProviderError) -> Self {
        *self.verify_error.lock().unwrap() = Some(err);
        self
    }

    #[must_use]
    pub fn fail_list_records(self, err: ProviderError) -> Self {
        *self.list_records_error.lock().unwrap() = Some(err);
        self
    }

    /// Fail create/update/delete calls with this error.
    #[must_use]
    pub fn fail_writes(self, err: ProviderError) -> Self {
        *self.write_error.lock().unwrap() = Some(err);
        self
    }

    #[must_use]
    pub fn verify_call_count(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn list_zone_call_count(&self) -> usize {
        self.list_zone_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn list_record_call_count(&self) -> usize {
        self.list_record_calls.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn write_call_count(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }

    fn check_write(&self) -> zonekeeper_provider::Result<()> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);
        match self.write_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl DnsApi for MockDnsApi {
    async fn verify_credentials(&self) -> zonekeeper_provider::Result<()> {
        self.verify_calls.fetch_add(1, Ordering::SeqCst);
        match self.verify_error.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    async fn list_zones(&self) -> zonekeeper_provider::Result<Vec<Zone>> {
        self.list_zone_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.zones.lock().unwrap().clone())
    }

    async fn list_records(&self, _zone_id: &str) -> zonekeeper_provider::Result<Vec<DnsRecord>> {
        self.list_record_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.list_records_error.lock().unwrap().clone() {
            return Err(err);
        }
        Ok(self.records.lock().unwrap().clone())
    }

    async fn get_record(
        &self,
        _zone_id: &str,
        record_id: &str,
    ) -> zonekeeper_provider::Result<DnsRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or_else(|| ProviderError::RecordNotFound {
                record_id: record_id.to_string(),
                raw_message: None,
            })
    }

    async fn create_record(
        &self,
        _zone_id: &str,
        record: &NewRecord,
    ) -> zonekeeper_provider::Result<DnsRecord> {
        self.check_write()?;
        let mut records = self.records.lock().unwrap();
        let created = DnsRecord {
            id: format!("mock-{}", records.len() + 1),
            record_type: record.record_type.to_string(),
            name: record.name.clone(),
            content: record.content.clone(),
            ttl: record.ttl,
            proxied: record.proxied.unwrap_or(false),
            locked: false,
            priority: record.priority,
            created_on: None,
            modified_on: None,
        };
        records.push(created.clone());
        Ok(created)
    }

    async fn update_record(
        &self,
        _zone_id: &str,
        record_id: &str,
        record: &UpdateRecord,
    ) -> zonekeeper_provider::Result<DnsRecord> {
        self.check_write()?;
        let mut records = self.records.lock().unwrap();
        let existing = records
            .iter_mut()
            .find(|r| r.id == record_id)
            .ok_or_else(|| ProviderError::RecordNotFound {
                record_id: record_id.to_string(),
                raw_message: None,
            })?;
        existing.record_type = record.record_type.to_string();
        existing.name = record.name.clone();
        existing.content = record.content.clone();
        existing.ttl = record.ttl;
        existing.proxied = record.proxied.unwrap_or(false);
        Ok(existing.clone())
    }

    async fn delete_record(
        &self,
        _zone_id: &str,
        record_id: &str,
    ) -> zonekeeper_provider::Result<()> {
        self.check_write()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.id != record_id);
        if records.len() == before {
            return Err(ProviderError::RecordNotFound {
                record_id: record_id.to_string(),
                raw_message: None,
            });
        }
        Ok(())
    }
}

/// Factory handing out one shared mock client regardless of credentials.
pub struct MockClientFactory {
    api: Arc<MockDnsApi>,
}

impl MockClientFactory {
    #[must_use]
    pub fn new(api: MockDnsApi) -> Self {
        Self { api: Arc::new(api) }
    }

    #[must_use]
    pub fn api(&self) -> &MockDnsApi {
        &self.api
    }
}

impl ClientFactory for MockClientFactory {
    fn make_client(&self, _credentials: CloudflareCredentials) -> Arc<dyn DnsApi> {
        Arc::clone(&self.api) as Arc<dyn DnsApi>
    }
}

/// In-memory store with one-shot failure injection.
#[derive(Default)]
pub struct MockAccountStore {
    users: Mutex<HashMap<i64, User>>,
    accounts: Mutex<Vec<ProviderAccount>>,
    next_create_error: Mutex<Option<CoreError>>,
    seq: AtomicUsize,
}

impl MockAccountStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `create_account` call fail with this error; the
    /// retry after it succeeds.
    pub fn fail_next_create(&self, err: CoreError) {
        *self.next_create_error.lock().unwrap() = Some(err);
    }

    #[must_use]
    pub fn accounts(&self) -> Vec<ProviderAccount> {
        self.accounts.lock().unwrap().clone()
    }

    /// Seed a user directly, bypassing `save_user`.
    pub fn seed_user(&self, user: User) {
        self.users.lock().unwrap().insert(user.chat_id, user);
    }

    /// Seed an account directly, bypassing the onboarding flow.
    pub fn seed_account(&self, account: ProviderAccount) {
        self.accounts.lock().unwrap().push(account);
    }

    fn next_seq(&self) -> i64 {
        i64::try_from(self.seq.fetch_add(1, Ordering::SeqCst)).unwrap() + 1
    }
}

#[async_trait]
impl AccountStore for MockAccountStore {
    async fn save_user(&self, user: &NewUser) -> CoreResult<User> {
        let seq = self.next_seq();
        let mut users = self.users.lock().unwrap();
        let stored = users
            .entry(user.chat_id)
            .and_modify(|u| {
                u.username = user.username.clone();
                u.first_name = user.first_name.clone();
                u.last_name = user.last_name.clone();
                u.updated_at = ts(seq);
            })
            .or_insert_with(|| User {
                chat_id: user.chat_id,
                username: user.username.clone(),
                first_name: user.first_name.clone(),
                last_name: user.last_name.clone(),
                created_at: ts(seq),
                updated_at: ts(seq),
            });
        Ok(stored.clone())
    }

    async fn user_exists(&self, chat_id: i64) -> CoreResult<bool> {
        Ok(self.users.lock().unwrap().contains_key(&chat_id))
    }

    async fn get_user(&self, chat_id: i64) -> CoreResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&chat_id).cloned())
    }

    async fn create_account(&self, account: &NewProviderAccount) -> CoreResult<ProviderAccount> {
        if let Some(err) = self.next_create_error.lock().unwrap().take() {
            return Err(err);
        }
        let mut accounts = self.accounts.lock().unwrap();
        if accounts
            .iter()
            .any(|a| a.user_id == account.user_id && a.zone_id == account.zone_id)
        {
            return Err(CoreError::DuplicateZone {
                zone_id: account.zone_id.clone(),
            });
        }
        let seq = self.next_seq();
        let stored = ProviderAccount {
            id: seq,
            user_id: account.user_id,
            email: account.email.clone(),
            api_key: account.api_key.clone(),
            account_id: account.account_id.clone(),
            zone_id: account.zone_id.clone(),
            zone_name: account.zone_name.clone(),
            created_at: ts(seq),
            updated_at: ts(seq),
        };
        accounts.push(stored.clone());
        Ok(stored)
    }

    async fn list_accounts(&self, user_id: i64) -> CoreResult<Vec<ProviderAccount>> {
        let mut accounts: Vec<ProviderAccount> = self
            .accounts
            .lock()
            .unwrap()
            .iter()
            .filter(|a| a.user_id == user_id)
            .cloned()
            .collect();
        accounts.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(accounts)
    }

    async fn get_active_account(&self, user_id: i64) -> CoreResult<Option<ProviderAccount>> {
        Ok(self.list_accounts(user_id).await?.into_iter().next())
    }

    async fn switch_active_zone(
        &self,
        user_id: i64,
        zone_id: &str,
    ) -> CoreResult<ProviderAccount> {
        let mut accounts = self.accounts.lock().unwrap();
        // Recency encodes selection, so the switched-to account must
        // outrank every other row regardless of how they were seeded.
        let newest = accounts
            .iter()
            .map(|a| a.updated_at)
            .max()
            .unwrap_or_default();
        let account = accounts
            .iter_mut()
            .find(|a| a.user_id == user_id && a.zone_id == zone_id)
            .ok_or(CoreError::AccountNotFound(user_id))?;
        account.updated_at = newest + chrono::Duration::seconds(1);
        Ok(account.clone())
    }
}
