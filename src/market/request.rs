use crate::market::asset::AssetList;
use tokio::sync::oneshot;

#[derive(Debug)]
pub struct AssetListRequest {
    pub panel: String,
    pub limit: u32,
    pub resp_sender: oneshot::Sender<AssetList>,
}
