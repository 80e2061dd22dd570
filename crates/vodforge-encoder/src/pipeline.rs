//! Encode pipeline: ladder submission and job supervision.

use metrics::counter;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use vodforge_client::types::{EncodingOutput, EncodingRequest, Mp4MuxingRequest, TsMuxingRequest};
use vodforge_client::{await_completion, EncodingClient};
use vodforge_models::{audio_ladder, video_ladder, ContainerFormat, JobHandle, JobStatus};

use crate::config::EncoderConfig;
use crate::error::{EncoderError, EncoderResult};
use crate::ledger::Ledger;
use crate::paths;

/// Fragment duration of MP4 muxings, in milliseconds.
const MP4_FRAGMENT_DURATION_MS: u32 = 4000;
/// Segment length of TS muxings, in seconds.
const TS_SEGMENT_LENGTH_SECS: f64 = 4.0;
/// Codec type recorded in the ledger for the H.264/AAC ladder.
const LEDGER_CODEC_TYPE: &str = "h264_aac";

/// Metric names emitted by the pipeline.
pub mod metric_names {
    pub const ENCODINGS_SUBMITTED_TOTAL: &str = "vodforge_encodings_submitted_total";
    pub const ENCODINGS_FINISHED_TOTAL: &str = "vodforge_encodings_finished_total";
    pub const ENCODINGS_FAILED_TOTAL: &str = "vodforge_encodings_failed_total";
}

/// Handle to one submitted encoding.
#[derive(Debug, Clone)]
pub struct Submission {
    pub encoding_id: String,
    pub asset: String,
    pub handle: JobHandle,
}

/// Submits the rendition ladder for an asset and supervises the encoding
/// job.
pub struct EncodePipeline {
    client: EncodingClient,
    config: EncoderConfig,
    ledger: Ledger,
}

impl EncodePipeline {
    pub fn new(client: EncodingClient, config: EncoderConfig) -> Self {
        let ledger = Ledger::new(config.ledger_path.clone());
        Self { client, config, ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Submit the full ladder for one asset and start the encoding.
    ///
    /// Either the encoding fully submits, or the first failure aborts the
    /// whole operation; there is no partial-success state to resume.
    pub async fn submit(&self, asset: &str) -> EncoderResult<Submission> {
        if asset.trim().is_empty() {
            return Err(EncoderError::invalid_asset("asset name must not be empty"));
        }

        info!(asset = %asset, "submitting encoding");

        let encoding = self
            .client
            .create_encoding(&EncodingRequest {
                name: format!("vodforge-vod-{asset}"),
                description: Some(format!("VOD preset encoding for {asset}")),
                cloud_region: self.config.cloud_region.clone(),
                infrastructure_id: self.config.infrastructure_id.clone(),
            })
            .await?;

        let input = self
            .client
            .ensure_input(&self.config.gcs_input_request(), self.config.reuse_resources)
            .await?;
        let output = self
            .client
            .ensure_output(&self.config.gcs_output_request(), self.config.reuse_resources)
            .await?;

        let input_path = paths::input_path(&self.config.input_base_path, asset);

        for rendition in video_ladder() {
            let codec = self.client.create_h264_configuration(rendition).await?;
            let stream =
                self.client.create_stream(&encoding.id, &input.id, &input_path, &codec.id).await?;

            let mp4_path = paths::output_path(
                &self.config.output_base_path,
                asset,
                &paths::video_rendition_path(ContainerFormat::Mp4, rendition),
            );
            self.client
                .create_mp4_muxing(
                    &encoding.id,
                    &Mp4MuxingRequest::fragmented(
                        "video.mp4",
                        MP4_FRAGMENT_DURATION_MS,
                        &stream.id,
                        EncodingOutput::public(&output.id, mp4_path),
                    ),
                )
                .await?;

            let ts_path = paths::output_path(
                &self.config.output_base_path,
                asset,
                &paths::video_rendition_path(ContainerFormat::Ts, rendition),
            );
            self.client
                .create_ts_muxing(
                    &encoding.id,
                    &TsMuxingRequest::segmented(
                        TS_SEGMENT_LENGTH_SECS,
                        &stream.id,
                        EncodingOutput::public(&output.id, ts_path),
                    ),
                )
                .await?;
        }

        for rendition in audio_ladder() {
            let codec = self.client.create_aac_configuration(rendition).await?;
            let stream =
                self.client.create_stream(&encoding.id, &input.id, &input_path, &codec.id).await?;

            let mp4_path = paths::output_path(
                &self.config.output_base_path,
                asset,
                &paths::audio_rendition_path(ContainerFormat::Mp4, rendition),
            );
            self.client
                .create_mp4_muxing(
                    &encoding.id,
                    &Mp4MuxingRequest::fragmented(
                        "audio.mp4",
                        MP4_FRAGMENT_DURATION_MS,
                        &stream.id,
                        EncodingOutput::public(&output.id, mp4_path),
                    ),
                )
                .await?;

            let ts_path = paths::output_path(
                &self.config.output_base_path,
                asset,
                &paths::audio_rendition_path(ContainerFormat::Ts, rendition),
            );
            self.client
                .create_ts_muxing(
                    &encoding.id,
                    &TsMuxingRequest::segmented(
                        TS_SEGMENT_LENGTH_SECS,
                        &stream.id,
                        EncodingOutput::public(&output.id, ts_path),
                    ),
                )
                .await?;
        }

        if let Some(url) = &self.config.webhook_url {
            self.client.register_finished_webhook(&encoding.id, url).await?;
        }

        self.ledger.record(asset, LEDGER_CODEC_TYPE, &encoding.id).await?;

        self.client.start_encoding(&encoding.id).await?;
        counter!(metric_names::ENCODINGS_SUBMITTED_TOTAL).increment(1);

        info!(encoding_id = %encoding.id, asset = %asset, "encoding started");

        Ok(Submission {
            handle: JobHandle::encoding(encoding.id.clone()),
            encoding_id: encoding.id,
            asset: asset.to_string(),
        })
    }

    /// Wait until the encoding reaches a terminal state. An ERROR terminal
    /// state surfaces every ERROR-severity task message and fails.
    pub async fn await_finished(
        &self,
        encoding_id: &str,
        cancel: &CancellationToken,
    ) -> EncoderResult<()> {
        let client = &self.client;
        let task =
            await_completion(|| client.encoding_status(encoding_id), &self.config.poll, cancel)
                .await?;

        if task.status == JobStatus::Error {
            let messages: Vec<String> =
                task.error_messages().into_iter().map(str::to_string).collect();
            for message in &messages {
                error!(encoding_id = %encoding_id, "encoding error: {message}");
            }
            counter!(metric_names::ENCODINGS_FAILED_TOTAL).increment(1);
            return Err(EncoderError::JobFailed {
                encoding_id: encoding_id.to_string(),
                messages,
            });
        }

        counter!(metric_names::ENCODINGS_FINISHED_TOTAL).increment(1);
        info!(encoding_id = %encoding_id, progress = ?task.progress, "encoding finished");
        Ok(())
    }

    /// Submit and wait for completion.
    pub async fn run(&self, asset: &str, cancel: &CancellationToken) -> EncoderResult<Submission> {
        let submission = self.submit(asset).await?;
        self.await_finished(&submission.encoding_id, cancel).await?;
        Ok(submission)
    }
}
