use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;

#[derive(Serialize)]
pub struct Request<'d> {
    method: &'static str,
    params: Params<'d>,
    #[serde(rename = "requestTimeMils")]
    request_time_mils: u64,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Params<'d> {
    ChildDeviceList {
        start_index: usize,
    },
    ControlChild {
        device_id: &'d str,
        #[serde(rename = "requestData")]
        request_data: MultipleRequest,
    },
}

#[derive(Serialize)]
struct MultipleRequest {
    method: &'static str,
    params: Requests,
}

#[derive(Serialize)]
struct Requests {
    requests: [ChildRequest; 1],
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "method", content = "params", rename_all = "snake_case")]
pub enum ChildRequest {
    GetDeviceInfo,
    SetDeviceInfo { device_on: bool },
}

impl<'d> Request<'d> {
    pub fn get_child_device_list(start_index: usize) -> Self {
        Request {
            method: "get_child_device_list",
            params: Params::ChildDeviceList { start_index },
            request_time_mils: timestamp(),
        }
    }

    pub fn control_child(device_id: &'d str, request: ChildRequest) -> Self {
        Request {
            method: "control_child",
            params: Params::ControlChild {
                device_id,
                request_data: MultipleRequest {
                    method: "multipleRequest",
                    params: Requests {
                        requests: [request],
                    },
                },
            },
            request_time_mils: timestamp(),
        }
    }
}

fn timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
