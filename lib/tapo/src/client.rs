mod cipher;
mod error;
mod parser;
mod request;

pub use error::{Error, HandshakeError};

use cipher::Cipher;
use parser::{parse_control_child, parse_response, ChildDeviceListPage};
use request::{ChildRequest, Request};

use std::time::Duration;

use crypto::hash::{sha1, sha256};
use crypto::Token;
use log::{debug, trace};
use rand::RngCore;
use reqwest::header::{HeaderMap, COOKIE, SET_COOKIE};
use reqwest::Response;

use crate::ChildDevice;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const SESSION_COOKIE: &str = "TP_SESSIONID";

/// Account-wide entry point. Every strip on the account shares the same
/// credentials, so one client opens sessions to all of them.
#[derive(Clone)]
pub struct Client {
    auth_hash: Token<32>,
    http_client: reqwest::Client,
}

/// An authenticated KLAP session with one strip.
pub struct Session {
    address: String,
    url: String,
    cookie: String,
    cipher: Cipher,
    http_client: reqwest::Client,
}

impl Client {
    pub fn new(username: &str, password: &str) -> Result<Self, Error> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            auth_hash: auth_hash(username, password),
            http_client,
        })
    }

    pub async fn connect(&self, address: &str) -> Result<Session, Error> {
        let url = format!("http://{address}/app");
        let local_seed = generate_seed();

        debug!("handshake1 with {address}");

        let response = self
            .http_client
            .post(format!("{url}/handshake1"))
            .body(local_seed.to_vec())
            .send()
            .await?;
        let response = check_handshake_status(response)?;

        let cookie = session_cookie(response.headers())?;
        let body = response.bytes().await?;

        if body.len() < 48 {
            return Err(HandshakeError::UnexpectedLength(body.len()).into());
        }

        let mut remote_seed = [0; 16];
        remote_seed.copy_from_slice(&body[..16]);

        let (expected, confirmation) = handshake_hashes(&local_seed, &remote_seed, &self.auth_hash);
        if body[16..48] != expected {
            return Err(HandshakeError::HashMismatch.into());
        }

        debug!("handshake2 with {address}");

        let response = self
            .http_client
            .post(format!("{url}/handshake2"))
            .header(COOKIE, &cookie)
            .body(confirmation.to_vec())
            .send()
            .await?;
        check_handshake_status(response)?;

        debug!("established session with {address}");

        Ok(Session {
            address: address.to_string(),
            url,
            cookie,
            cipher: Cipher::new(&local_seed, &remote_seed, &self.auth_hash),
            http_client: self.http_client.clone(),
        })
    }
}

impl Session {
    pub async fn get_child_device_list(&mut self) -> Result<Vec<ChildDevice>, Error> {
        let mut children = Vec::new();
        let mut start_index = Some(0);

        while let Some(start) = start_index {
            let request = Request::get_child_device_list(start);
            let payload = self.request(&request).await?;
            let page: ChildDeviceListPage = parse_response(&payload)?;

            let received = page.child_device_list.len();
            for child in page.child_device_list {
                children.push(ChildDevice::try_from(child)?);
            }

            trace!("{} of {} children from {}", children.len(), page.sum, self.address);

            start_index = next_page(children.len(), received, page.sum);
        }

        Ok(children)
    }

    pub async fn get_device_on(&mut self, device_id: &str) -> Result<bool, Error> {
        let request = Request::control_child(device_id, ChildRequest::GetDeviceInfo);
        let payload = self.request(&request).await?;
        let info = parse_control_child(&payload)?;

        info["device_on"].as_bool().ok_or(Error::MissingResult)
    }

    pub async fn set_device_on(&mut self, device_id: &str, device_on: bool) -> Result<(), Error> {
        let request = Request::control_child(device_id, ChildRequest::SetDeviceInfo { device_on });
        let payload = self.request(&request).await?;
        parse_control_child(&payload)?;

        Ok(())
    }

    async fn request(&mut self, request: &Request<'_>) -> Result<Vec<u8>, Error> {
        let payload = serde_json::to_vec(request)?;
        trace!("request: {}", String::from_utf8_lossy(&payload));

        let (seq, body) = self.cipher.encrypt(payload)?;

        let response = self
            .http_client
            .post(format!("{}/request?seq={seq}", self.url))
            .header(COOKIE, &self.cookie)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status(status.as_u16()));
        }

        let mut body = response.bytes().await?.to_vec();
        let payload = self.cipher.decrypt(seq, &mut body)?;

        trace!("response: {}", String::from_utf8_lossy(&payload));

        Ok(payload)
    }
}

/// Start index of the next child list page, or `None` once `sum` children
/// are collected. An empty page ends the list regardless of `sum`.
fn next_page(collected: usize, received: usize, sum: usize) -> Option<usize> {
    (received > 0 && collected < sum).then_some(collected)
}

fn check_handshake_status(response: Response) -> Result<Response, HandshakeError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(HandshakeError::Status(status.as_u16()))
    }
}

fn session_cookie(headers: &HeaderMap) -> Result<String, HandshakeError> {
    headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .map(str::trim)
        .find(|pair| {
            pair.split_once('=')
                .is_some_and(|(name, _)| name == SESSION_COOKIE)
        })
        .map(str::to_string)
        .ok_or(HandshakeError::MissingCookie)
}

fn auth_hash(username: &str, password: &str) -> Token<32> {
    sha256(&[&sha1(username.as_bytes()), &sha1(password.as_bytes())])
}

/// Returns the hash the strip must answer handshake1 with and the one we
/// confirm with in handshake2.
fn handshake_hashes(
    local_seed: &[u8],
    remote_seed: &[u8],
    auth_hash: &[u8],
) -> (Token<32>, Token<32>) {
    (
        sha256(&[local_seed, remote_seed, auth_hash]),
        sha256(&[remote_seed, local_seed, auth_hash]),
    )
}

fn generate_seed() -> Token<16> {
    let mut seed = [0u8; 16];
    rand::rng().fill_bytes(&mut seed);
    seed
}
