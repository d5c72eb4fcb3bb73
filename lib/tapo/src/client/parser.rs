use base64::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use super::Error;
use crate::ChildDevice;

#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    error_code: i32,
    result: Option<T>,
}

impl<T> Envelope<T> {
    fn into_result(self) -> Result<Option<T>, Error> {
        if self.error_code != 0 {
            return Err(Error::Device(self.error_code));
        }

        Ok(self.result)
    }
}

#[derive(Deserialize)]
pub struct ChildDeviceListPage {
    pub child_device_list: Vec<ChildDeviceInfo>,
    #[serde(default)]
    pub sum: usize,
}

#[derive(Deserialize)]
pub struct ChildDeviceInfo {
    device_id: String,
    nickname: String,
    device_on: bool,
}

impl TryFrom<ChildDeviceInfo> for ChildDevice {
    type Error = Error;

    fn try_from(info: ChildDeviceInfo) -> Result<Self, Self::Error> {
        Ok(ChildDevice {
            device_id: info.device_id,
            nickname: decode_nickname(&info.nickname)?,
            device_on: info.device_on,
        })
    }
}

#[derive(Deserialize)]
struct ControlChildResult {
    #[serde(rename = "responseData")]
    response_data: Envelope<MultipleResult>,
}

#[derive(Deserialize)]
struct MultipleResult {
    responses: Vec<Envelope<Value>>,
}

pub fn parse_response<T: DeserializeOwned>(payload: &[u8]) -> Result<T, Error> {
    let envelope: Envelope<T> = serde_json::from_slice(payload)?;
    envelope.into_result()?.ok_or(Error::MissingResult)
}

/// Unwraps the single `multipleRequest` answer nested inside a
/// `control_child` response. Commands without a result yield `Null`.
pub fn parse_control_child(payload: &[u8]) -> Result<Value, Error> {
    let result: ControlChildResult = parse_response(payload)?;

    let responses = result
        .response_data
        .into_result()?
        .ok_or(Error::MissingResult)?
        .responses;

    let response = responses.into_iter().next().ok_or(Error::MissingResult)?;
    Ok(response.into_result()?.unwrap_or(Value::Null))
}

fn decode_nickname(nickname: &str) -> Result<String, Error> {
    let data = BASE64_STANDARD.decode(nickname)?;
    Ok(String::from_utf8(data)?)
}
