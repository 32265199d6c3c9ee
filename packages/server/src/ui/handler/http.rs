//! HTTP API endpoint handlers.
//!
//! ゲームごとのコマンドは失敗しても HTTP 200 で `{accepted: false, message}` を返す。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    domain::{GameKind, RoomId},
    infrastructure::dto::{
        http::{
            ApiResponse, CommandResponse, HealthResponse, MoveRequest, NewGameRequest,
            RoomDetailDto, RoomRequest, RoomSummaryDto, StatusRequest, UpdateRequest,
        },
        websocket::ServerMessage,
    },
    ui::state::AppState,
    usecase::CommandError,
};

use super::push_updates;

/// 拒否されたコマンド（常に 200 で返す）
#[derive(Debug)]
pub struct Rejection(String);

impl From<CommandError> for Rejection {
    fn from(error: CommandError) -> Self {
        Self(error.to_string())
    }
}

impl From<JsonRejection> for Rejection {
    fn from(rejection: JsonRejection) -> Self {
        Self(format!("Incorrect request data: {}", rejection.body_text()))
    }
}

impl IntoResponse for Rejection {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected: {}", self.0);
        Json(CommandResponse::rejected(self.0)).into_response()
    }
}

type CommandResult = Result<Json<CommandResponse>, Rejection>;

fn parse_game(name: &str) -> Result<GameKind, CommandError> {
    Ok(name.parse()?)
}

fn parse_room(room: String) -> Result<RoomId, CommandError> {
    Ok(RoomId::new(room)?)
}

pub async fn open_room(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
    payload: Result<Json<RoomRequest>, JsonRejection>,
) -> CommandResult {
    let game = parse_game(&game)?;
    let Json(request) = payload?;
    let room_id = parse_room(request.room)?;
    state.open_room_usecase.execute(game, room_id).await?;
    Ok(Json(CommandResponse::accepted("New room opened")))
}

pub async fn close_room(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
    payload: Result<Json<RoomRequest>, JsonRejection>,
) -> CommandResult {
    let game = parse_game(&game)?;
    let Json(request) = payload?;
    let room_id = parse_room(request.room)?;
    let remaining = state.close_room_usecase.execute(game, &room_id).await?;

    if !remaining.is_empty()
        && let Ok(notice) = serde_json::to_string(&ServerMessage::error("Room closed"))
    {
        state
            .close_room_usecase
            .notify_closed(remaining, &notice)
            .await;
    }
    Ok(Json(CommandResponse::accepted("Room closed")))
}

pub async fn new_game(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
    payload: Result<Json<NewGameRequest>, JsonRejection>,
) -> CommandResult {
    let game = parse_game(&game)?;
    let Json(request) = payload?;
    let room_id = parse_room(request.room)?;
    state
        .start_new_game_usecase
        .execute(game, &room_id, request.players)
        .await?;
    push_updates(&state, &room_id).await;
    Ok(Json(CommandResponse::accepted("New game started!")))
}

pub async fn new_round(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
    payload: Result<Json<RoomRequest>, JsonRejection>,
) -> CommandResult {
    let game = parse_game(&game)?;
    let Json(request) = payload?;
    let room_id = parse_room(request.room)?;
    state.start_new_round_usecase.execute(game, &room_id).await?;
    push_updates(&state, &room_id).await;
    Ok(Json(CommandResponse::accepted("New round started!")))
}

pub async fn make_move(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
    payload: Result<Json<MoveRequest>, JsonRejection>,
) -> CommandResult {
    let game = parse_game(&game)?;
    let Json(request) = payload?;
    let room_id = parse_room(request.room)?;
    let receipt = state
        .make_move_usecase
        .execute(game, &room_id, request.player, &request.notation, request.dices)
        .await?;
    push_updates(&state, &room_id).await;
    Ok(Json(CommandResponse::accepted(receipt.message)))
}

pub async fn get_update(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
    payload: Result<Json<UpdateRequest>, JsonRejection>,
) -> CommandResult {
    let game = parse_game(&game)?;
    let Json(request) = payload?;
    let room_id = parse_room(request.room)?;
    let view = state
        .get_update_usecase
        .execute(game, &room_id, request.player)
        .await?;
    Ok(Json(
        CommandResponse::accepted("Request successful").with_update(view),
    ))
}

/// ルーム指定なし（ボディなしも可）ならサーバーの稼働確認
pub async fn get_status(
    State(state): State<Arc<AppState>>,
    Path(game): Path<String>,
    payload: Result<Json<StatusRequest>, JsonRejection>,
) -> CommandResult {
    let game = parse_game(&game)?;
    let request = match payload {
        Ok(Json(request)) => request,
        Err(JsonRejection::MissingJsonContentType(_)) => StatusRequest::default(),
        Err(rejection) => return Err(rejection.into()),
    };
    let room_id = request.room.map(parse_room).transpose()?;

    match state.get_status_usecase.execute(game, room_id).await? {
        Some(status) => Ok(Json(
            CommandResponse::accepted("Room active").with_status(status),
        )),
        None => Ok(Json(CommandResponse::accepted("Server online!"))),
    }
}

/// `GET|POST /{game}/api`
pub async fn api(Path(game): Path<String>) -> Result<Json<ApiResponse>, Rejection> {
    let game = parse_game(&game)?;
    Ok(Json(ApiResponse {
        accepted: true,
        api: game.descriptor(),
    }))
}

/// Health check endpoint
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        rooms: state.get_rooms_usecase.count().await,
    })
}

/// Get list of rooms
pub async fn get_rooms(State(state): State<Arc<AppState>>) -> Json<Vec<RoomSummaryDto>> {
    let rooms = state.get_rooms_usecase.execute().await;

    // Domain Model から DTO への変換
    Json(rooms.iter().map(RoomSummaryDto::from).collect())
}

/// Get room detail by ID
pub async fn get_room_detail(
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
) -> Result<Json<RoomDetailDto>, StatusCode> {
    let room_id = RoomId::new(room_id).map_err(|_| StatusCode::NOT_FOUND)?;
    match state.get_room_detail_usecase.execute(&room_id).await {
        Ok(room) => Ok(Json(RoomDetailDto::from(&room))),
        Err(CommandError::RoomNotFound(_)) => Err(StatusCode::NOT_FOUND),
        Err(e) => {
            tracing::error!("Failed to get room '{}': {}", room_id, e);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
