//! Streaming output helpers.

use std::pin::Pin;

use futures::{Stream, StreamExt};

use crate::error::CapabilityError;

/// Stream of text chunks from a capability session.
pub type OutputStream = Pin<Box<dyn Stream<Item = Result<String, CapabilityError>> + Send>>;

/// Concatenate a streamed response until the stream is exhausted.
///
/// Stops at the first failed chunk and returns its error.
pub async fn collect_stream<S>(stream: S) -> Result<String, CapabilityError>
where
    S: Stream<Item = Result<String, CapabilityError>>,
{
    let mut stream = std::pin::pin!(stream);
    let mut text = String::new();
    while let Some(chunk) = stream.next().await {
        text.push_str(&chunk?);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_collect_stream_concatenates() {
        let chunks: Vec<Result<String, CapabilityError>> = vec![
            Ok("The ".to_string()),
            Ok("market ".to_string()),
            Ok("rose.".to_string()),
        ];
        let stream: OutputStream = Box::pin(futures::stream::iter(chunks));
        assert_eq!(collect_stream(stream).await.unwrap(), "The market rose.");
    }

    #[tokio::test]
    async fn test_collect_stream_empty() {
        let stream: OutputStream = Box::pin(futures::stream::empty());
        assert_eq!(collect_stream(stream).await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_collect_stream_propagates_error() {
        let chunks: Vec<Result<String, CapabilityError>> = vec![
            Ok("partial".to_string()),
            Err(CapabilityError::StreamError("reset".to_string())),
            Ok("never".to_string()),
        ];
        let stream: OutputStream = Box::pin(futures::stream::iter(chunks));
        let err = collect_stream(stream).await.unwrap_err();
        assert!(matches!(err, CapabilityError::StreamError(_)));
    }

    #[tokio::test]
    async fn test_collect_stream_stops_at_first_error() {
        let chunks: Vec<Result<String, CapabilityError>> = vec![
            Ok("partial".to_string()),
            Err(CapabilityError::StreamError("reset".to_string())),
            Ok("never".to_string()),
        ];
        let mut seen = Vec::new();
        let stream = futures::stream::iter(chunks).inspect(|chunk| seen.push(chunk.is_ok()));
        assert!(collect_stream(stream).await.is_err());
        assert_eq!(seen, vec![true, false]);
    }
}
