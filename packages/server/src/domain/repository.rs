//! Repository trait 定義
//!
//! ドメイン層が必要とするルーム登録簿のインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{RepositoryError, Room, RoomId};

/// ルーム単位のロック付き共有ハンドル
///
/// コマンドは読み取りから変更までこのロックを保持し続ける。
pub type SharedRoom = Arc<Mutex<Room>>;

/// Room Repository trait
///
/// 登録簿そのもののロックは検索・追加・削除の間だけ保持される。
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームを登録（同じ ID が既にあればエラー）
    async fn insert_room(&self, room: Room) -> Result<SharedRoom, RepositoryError>;

    /// ルームを削除
    async fn remove_room(&self, room_id: &RoomId) -> Result<SharedRoom, RepositoryError>;

    /// ルームを取得
    async fn get_room(&self, room_id: &RoomId) -> Result<SharedRoom, RepositoryError>;

    /// 全ルームを ID 順で取得
    async fn list_rooms(&self) -> Vec<SharedRoom>;

    async fn count_rooms(&self) -> usize;
}
