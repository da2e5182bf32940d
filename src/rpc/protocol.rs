//! RPC 线上格式
//!
//! 每帧为 4 字节大端长度前缀加 UTF-8 JSON 正文。

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio_util::codec::LengthDelimitedCodec;

/// RPC 请求信封
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcRequest {
    /// 请求 id，应答原样带回
    pub id: String,
    pub pattern: String,
    #[serde(default)]
    pub data: Value,
}

impl RpcRequest {
    pub fn new(id: impl Into<String>, pattern: impl Into<String>, data: Value) -> Self {
        Self {
            id: id.into(),
            pattern: pattern.into(),
            data,
        }
    }
}

pub fn frame_codec(max_frame_length: usize) -> LengthDelimitedCodec {
    LengthDelimitedCodec::builder()
        .length_field_length(4)
        .big_endian()
        .max_frame_length(max_frame_length)
        .new_codec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::BytesMut;
    use serde_json::json;
    use tokio_util::codec::{Decoder, Encoder};

    #[test]
    fn test_request_without_data() {
        let request: RpcRequest =
            serde_json::from_str(r#"{"id":"1","pattern":"find_all_products"}"#).unwrap();
        assert_eq!(request.pattern, "find_all_products");
        assert!(request.data.is_null());
    }

    #[test]
    fn test_frame_layout() {
        let mut codec = frame_codec(1024);
        let body = serde_json::to_vec(&RpcRequest::new("7", "find_one_product", json!({ "id": 1 })))
            .unwrap();

        let mut buf = BytesMut::new();
        codec.encode(bytes::Bytes::from(body.clone()), &mut buf).unwrap();
        assert_eq!(&buf[..4], &(body.len() as u32).to_be_bytes());

        let frame = codec.decode(&mut buf).unwrap().unwrap();
        assert_eq!(&frame[..], &body[..]);
    }

    #[test]
    fn test_oversized_frame_rejected() {
        let mut codec = frame_codec(8);
        let mut buf = BytesMut::new();
        buf.extend_from_slice(&100u32.to_be_bytes());
        buf.extend_from_slice(&[0u8; 100]);
        assert!(codec.decode(&mut buf).is_err());
    }
}
