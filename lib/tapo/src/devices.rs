/// One outlet of a power strip as reported by `get_child_device_list`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildDevice {
    pub device_id: String,
    pub nickname: String,
    pub device_on: bool,
}
