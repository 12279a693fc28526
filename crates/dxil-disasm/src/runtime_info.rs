use dxil_container::PipelineRuntimeInfo;

use crate::report::Report;

/// Renders the stage facts decoded from a `PSV0` part.
///
/// Flags print as `1`/`0`. Compute and library programs only get the header.
pub fn render_runtime_info(report: &mut Report, info: &PipelineRuntimeInfo) {
    report.blank();
    report.line(" Pipeline Runtime Information:");
    report.blank();

    match info {
        PipelineRuntimeInfo::Vertex(vs) => {
            report.line(" Vertex Shader");
            report.line(format_args!(
                " OutputPositionPresent={}",
                u8::from(vs.output_position_present)
            ));
        }
        PipelineRuntimeInfo::Pixel(ps) => {
            report.line(" Pixel Shader");
            report.line(format_args!(" DepthOutput={}", u8::from(ps.depth_output)));
            report.line(format_args!(
                " SampleFrequency={}",
                u8::from(ps.sample_frequency)
            ));
        }
        PipelineRuntimeInfo::Geometry(gs) => {
            report.line(" Geometry Shader");
            report.line(format_args!(" InputPrimitive={}", gs.input_primitive_name()));
            report.line(format_args!(" OutputTopology={}", gs.output_topology_name()));
            report.line(format_args!(" OutputStreamMask={}", gs.output_stream_mask));
            report.line(format_args!(
                " OutputPositionPresent={}",
                u8::from(gs.output_position_present)
            ));
        }
        PipelineRuntimeInfo::Hull(hs) => {
            report.line(" Hull Shader");
            report.line(format_args!(
                " InputControlPointCount={}",
                hs.input_control_point_count
            ));
            report.line(format_args!(
                " OutputControlPointCount={}",
                hs.output_control_point_count
            ));
            report.line(format_args!(" Domain={}", hs.tessellator_domain_name()));
            report.line(format_args!(
                " OutputPrimitive={}",
                hs.tessellator_output_primitive_name()
            ));
        }
        PipelineRuntimeInfo::Domain(ds) => {
            report.line(" Domain Shader");
            report.line(format_args!(
                " InputControlPointCount={}",
                ds.input_control_point_count
            ));
            report.line(format_args!(
                " OutputPositionPresent={}",
                u8::from(ds.output_position_present)
            ));
        }
        PipelineRuntimeInfo::Other(_) => {}
    }

    report.blank();
}
