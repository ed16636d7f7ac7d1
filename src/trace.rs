use opentelemetry::{
    global,
    trace::{SamplingDecision, SamplingResult, TraceContextExt, TraceState, TracerProvider as _},
    KeyValue,
};
use opentelemetry_otlp::{Protocol, WithExportConfig};
use opentelemetry_sdk::{
    metrics::{MeterProviderBuilder, PeriodicReader, SdkMeterProvider},
    trace::{RandomIdGenerator, SdkTracerProvider, ShouldSample},
    Resource,
};
use opentelemetry_semantic_conventions::resource::SERVICE_VERSION;
use tracing::Level;
use tracing_opentelemetry::{MetricsLayer, OpenTelemetryLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::errors::{RelayError, Result};

const SERVICE_NAME: &str = "speech-relay";

/// Spans that are never exported. `health_request` is the request span of `/` and `/health`.
const UNSAMPLED_SPANS: [&str; 3] = ["health_request", "health_check", "root"];

#[derive(Debug, Clone)]
struct FilterSampler;

impl ShouldSample for FilterSampler {
    fn should_sample(
        &self,
        parent_context: Option<&opentelemetry::Context>,
        _trace_id: opentelemetry::TraceId,
        name: &str,
        _span_kind: &opentelemetry::trace::SpanKind,
        _attributes: &[KeyValue],
        _links: &[opentelemetry::trace::Link],
    ) -> opentelemetry::trace::SamplingResult {
        let decision = if is_unsampled(name) {
            SamplingDecision::Drop
        } else {
            SamplingDecision::RecordAndSample
        };

        SamplingResult {
            decision,
            attributes: vec![],
            trace_state: match parent_context {
                Some(ctx) => ctx.span().span_context().trace_state().clone(),
                None => TraceState::default(),
            },
        }
    }
}

fn is_unsampled(name: &str) -> bool {
    UNSAMPLED_SPANS.contains(&name)
}

fn resource() -> Resource {
    Resource::builder()
        .with_service_name(SERVICE_NAME)
        .with_attribute(KeyValue::new(SERVICE_VERSION, env!("CARGO_PKG_VERSION")))
        .build()
}

fn init_meter_provider(url: &str) -> Result<SdkMeterProvider> {
    let exporter = opentelemetry_otlp::MetricExporter::builder()
        .with_http()
        .with_endpoint(url)
        .with_protocol(Protocol::HttpBinary)
        .with_temporality(opentelemetry_sdk::metrics::Temporality::default())
        .build()
        .map_err(|e| RelayError::telemetry(e.to_string()))?;

    let reader = PeriodicReader::builder(exporter)
        .with_interval(std::time::Duration::from_secs(5))
        .build();

    let stdout_reader =
        PeriodicReader::builder(opentelemetry_stdout::MetricExporter::default()).build();

    let meter_provider = MeterProviderBuilder::default()
        .with_resource(resource())
        .with_reader(reader)
        .with_reader(stdout_reader)
        .build();

    global::set_meter_provider(meter_provider.clone());

    Ok(meter_provider)
}

fn init_tracer_provider(url: &str) -> Result<SdkTracerProvider> {
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_http()
        .with_endpoint(url)
        .with_protocol(Protocol::HttpBinary)
        .build()
        .map_err(|e| RelayError::telemetry(e.to_string()))?;

    Ok(SdkTracerProvider::builder()
        .with_sampler(FilterSampler)
        .with_id_generator(RandomIdGenerator::default())
        .with_resource(resource())
        .with_batch_exporter(exporter)
        .build())
}

/// Install the global subscriber. Spans and metrics are exported over
/// OTLP/HTTP only when `otel_http_url` is set.
pub fn init_tracing_subscriber(otel_http_url: &Option<String>, level: Level) -> Result<OtelGuard> {
    let registry = tracing_subscriber::registry()
        .with(tracing_subscriber::filter::LevelFilter::from_level(level))
        .with(tracing_subscriber::fmt::layer());

    if let Some(url) = otel_http_url {
        let tracer_provider = init_tracer_provider(url)?;
        let meter_provider = init_meter_provider(url)?;

        let tracer = tracer_provider.tracer(SERVICE_NAME);

        registry
            .with(MetricsLayer::new(meter_provider.clone()))
            .with(OpenTelemetryLayer::new(tracer))
            .init();

        Ok(OtelGuard {
            tracer_provider: Some(tracer_provider),
            meter_provider: Some(meter_provider),
        })
    } else {
        registry.init();

        Ok(OtelGuard {
            tracer_provider: None,
            meter_provider: None,
        })
    }
}

/// Flushes and shuts down the exporters when dropped.
pub struct OtelGuard {
    tracer_provider: Option<SdkTracerProvider>,
    meter_provider: Option<SdkMeterProvider>,
}

impl Drop for OtelGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.tracer_provider.take() {
            if let Err(err) = provider.shutdown() {
                eprintln!("Failed to shut down tracer provider: {err:?}");
            }
        }

        if let Some(provider) = self.meter_provider.take() {
            if let Err(err) = provider.shutdown() {
                eprintln!("Failed to shut down meter provider: {err:?}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_spans_are_not_sampled() {
        assert!(is_unsampled("health_check"));
        assert!(is_unsampled("root"));
        assert!(is_unsampled("health_request"));
        assert!(!is_unsampled("request"));
        assert!(!is_unsampled("text_to_speech"));
    }

    #[test]
    fn test_sampler_decision() {
        let sampler = FilterSampler;
        let trace_id = opentelemetry::TraceId::from_bytes([1; 16]);
        let kind = opentelemetry::trace::SpanKind::Server;

        let dropped = sampler.should_sample(None, trace_id, "health_check", &kind, &[], &[]);
        assert_eq!(dropped.decision, SamplingDecision::Drop);

        let health = sampler.should_sample(None, trace_id, "health_request", &kind, &[], &[]);
        assert_eq!(health.decision, SamplingDecision::Drop);

        let kept = sampler.should_sample(None, trace_id, "speech_to_text", &kind, &[], &[]);
        assert_eq!(kept.decision, SamplingDecision::RecordAndSample);
    }
}
