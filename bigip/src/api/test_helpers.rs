//! Test helpers for the iControl REST API

#![allow(clippy::disallowed_methods)]

use super::{
    AddressList, ApiError, BigIpApi, Client, TrafficMatchingCriteria, UniversalPersistenceProfile,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn create_test_client(url: &str) -> Client {
    Client::new(url, "admin", "secret", true).unwrap()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Create,
    Get,
    Modify,
    Delete,
}

/// In-memory device. Objects are keyed by their full name; failures can be
/// injected per operation and every call is recorded as `"<op> <name>"`.
#[derive(Default)]
pub struct FakeBigIp {
    pub profiles: Mutex<HashMap<String, UniversalPersistenceProfile>>,
    pub criteria: Mutex<HashMap<String, TrafficMatchingCriteria>>,
    pub address_lists: Mutex<HashMap<String, AddressList>>,
    failures: Mutex<HashMap<Op, (u16, String)>>,
    calls: Mutex<Vec<String>>,
    last_profile: Mutex<Option<UniversalPersistenceProfile>>,
}

impl FakeBigIp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, op: Op, status: u16, message: &str) {
        self.failures
            .lock()
            .unwrap()
            .insert(op, (status, message.to_string()));
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn last_profile_request(&self) -> Option<UniversalPersistenceProfile> {
        self.last_profile.lock().unwrap().clone()
    }

    fn record(&self, op: Op, name: &str) -> Result<(), ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{} {}", format!("{:?}", op).to_lowercase(), name));

        match self.failures.lock().unwrap().get(&op) {
            Some((status, message)) => Err(ApiError::ApiError {
                status: *status,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

fn not_found(name: &str) -> ApiError {
    ApiError::ApiError {
        status: 404,
        message: format!("The requested object ({}) was not found.", name),
    }
}

fn merge<T: serde::Serialize + serde::de::DeserializeOwned>(current: &T, update: &T) -> T {
    let mut merged = serde_json::to_value(current).unwrap();
    if let (Some(target), serde_json::Value::Object(fields)) =
        (merged.as_object_mut(), serde_json::to_value(update).unwrap())
    {
        for (key, value) in fields {
            target.insert(key, value);
        }
    }
    serde_json::from_value(merged).unwrap()
}

#[async_trait]
impl BigIpApi for FakeBigIp {
    async fn create_universal_persistence_profile(
        &self,
        profile: &UniversalPersistenceProfile,
    ) -> Result<(), ApiError> {
        let name = profile.name.clone().unwrap_or_default();
        self.record(Op::Create, &name)?;
        self.profiles.lock().unwrap().insert(name, profile.clone());
        Ok(())
    }

    async fn get_universal_persistence_profile(
        &self,
        name: &str,
    ) -> Result<Option<UniversalPersistenceProfile>, ApiError> {
        self.record(Op::Get, name)?;
        Ok(self.profiles.lock().unwrap().get(name).cloned())
    }

    async fn modify_universal_persistence_profile(
        &self,
        name: &str,
        profile: &UniversalPersistenceProfile,
    ) -> Result<(), ApiError> {
        self.record(Op::Modify, name)?;
        *self.last_profile.lock().unwrap() = Some(profile.clone());
        let mut profiles = self.profiles.lock().unwrap();
        let current = profiles.get(name).ok_or_else(|| not_found(name))?;
        let merged = merge(current, profile);
        profiles.insert(name.to_string(), merged);
        Ok(())
    }

    async fn delete_universal_persistence_profile(&self, name: &str) -> Result<(), ApiError> {
        self.record(Op::Delete, name)?;
        self.profiles
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| not_found(name))
    }

    async fn create_traffic_matching_criteria(
        &self,
        criteria: &TrafficMatchingCriteria,
    ) -> Result<(), ApiError> {
        let name = criteria.name.clone().unwrap_or_default();
        self.record(Op::Create, &name)?;
        self.criteria.lock().unwrap().insert(name, criteria.clone());
        Ok(())
    }

    async fn get_traffic_matching_criteria(
        &self,
        name: &str,
    ) -> Result<Option<TrafficMatchingCriteria>, ApiError> {
        self.record(Op::Get, name)?;
        Ok(self.criteria.lock().unwrap().get(name).cloned())
    }

    async fn modify_traffic_matching_criteria(
        &self,
        name: &str,
        criteria: &TrafficMatchingCriteria,
    ) -> Result<(), ApiError> {
        self.record(Op::Modify, name)?;
        let mut all = self.criteria.lock().unwrap();
        let current = all.get(name).ok_or_else(|| not_found(name))?;
        let merged = merge(current, criteria);
        all.insert(name.to_string(), merged);
        Ok(())
    }

    async fn delete_traffic_matching_criteria(&self, name: &str) -> Result<(), ApiError> {
        self.record(Op::Delete, name)?;
        self.criteria
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| not_found(name))
    }

    async fn create_address_list(&self, list: &AddressList) -> Result<(), ApiError> {
        let name = list.name.clone().unwrap_or_default();
        self.record(Op::Create, &name)?;
        self.address_lists.lock().unwrap().insert(name, list.clone());
        Ok(())
    }

    async fn get_address_list(&self, name: &str) -> Result<Option<AddressList>, ApiError> {
        self.record(Op::Get, name)?;
        Ok(self.address_lists.lock().unwrap().get(name).cloned())
    }

    async fn modify_address_list(&self, name: &str, list: &AddressList) -> Result<(), ApiError> {
        self.record(Op::Modify, name)?;
        let mut all = self.address_lists.lock().unwrap();
        let current = all.get(name).ok_or_else(|| not_found(name))?;
        let merged = merge(current, list);
        all.insert(name.to_string(), merged);
        Ok(())
    }

    async fn delete_address_list(&self, name: &str) -> Result<(), ApiError> {
        self.record(Op::Delete, name)?;
        self.address_lists
            .lock()
            .unwrap()
            .remove(name)
            .map(|_| ())
            .ok_or_else(|| not_found(name))
    }
}
